// UI module - Slint GUI adapter
//
// This module contains:
// - GuiController: Main controller that wires the Slint window to the quiz session

pub mod controller;

pub use controller::GuiController;
