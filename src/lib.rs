//! Photovoltaic system simulator.
//!
//! Models the full chain from sun geometry to DC power: ephemeris sun
//! position with refraction ([`solar`]), airmass and pressure corrections
//! ([`atmosphere`]), transposition of horizontal irradiance onto the array
//! plane ([`irradiance`]), and the single-diode electrical model with SAPM
//! cell temperature ([`pv`]). The [`sim`] engine chains the stages over a
//! timestamped run, driven either by a measured weather file or by a
//! seeded AR(1) cloud synthesizer, and [`config`] wires scenarios from TOML.

pub mod atmosphere;
pub mod config;
pub mod io;
pub mod irradiance;
pub mod pv;
pub mod sim;
pub mod solar;
