// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slide-deck output: a minimal PresentationML package written with `zip`.

pub mod deck;
pub mod layout;
mod parts;

pub use deck::{PlacedPicture, SlideDeck};
pub use layout::{Frame, SlideGeometry};
