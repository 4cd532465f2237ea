//! Simulated AHRS and traffic sources.
//!
//! Deterministic, frame-stepped stand-ins for the real orientation and
//! ADS-B collaborators: the aircraft turns slowly while rocking in roll and
//! pitch, and each target orbits own ship at its own range and altitude.

use std::f64::consts::TAU;

use aerohud_core::{normalize, Orientation, TrafficReport};

const TURN_RATE_DEGREES: f64 = 0.5;
const ROLL_AMPLITUDE: f64 = 30.0;
const PITCH_AMPLITUDE: f64 = 10.0;
const ROLL_PERIOD_FRAMES: f64 = 600.0;
const CRUISE_ALTITUDE: f64 = 4500.0;

/// Frame-stepped own-aircraft orientation
#[derive(Debug, Clone)]
pub struct AhrsSimulation {
    frame: u64,
    heading: f64,
    /// Report the heading as unavailable every this many frames
    dropout_every: Option<u64>,
}

impl AhrsSimulation {
    pub fn new(initial_heading: f64, dropout_every: Option<u64>) -> Self {
        AhrsSimulation {
            frame: 0,
            heading: normalize(initial_heading),
            dropout_every: dropout_every.filter(|every| *every > 0),
        }
    }

    pub fn orientation(&self) -> Orientation {
        let phase = self.frame as f64 / ROLL_PERIOD_FRAMES * TAU;
        let dropout = self
            .dropout_every
            .is_some_and(|every| self.frame % every == every - 1);
        let heading = if dropout { None } else { Some(self.heading) };

        Orientation {
            roll: ROLL_AMPLITUDE * phase.sin(),
            pitch: PITCH_AMPLITUDE * (phase / 2.0).sin(),
            heading,
            projection_heading: heading,
            gps_heading: Some(normalize(self.heading + 3.0)),
            altitude: CRUISE_ALTITUDE,
        }
    }

    pub fn simulate(&mut self) {
        self.frame += 1;
        self.heading = normalize(self.heading + TURN_RATE_DEGREES);
    }
}

/// One target orbiting own ship
#[derive(Debug, Clone)]
pub struct SimulatedTraffic {
    bearing: f64,
    distance: f64,
    altitude: f64,
    orbit_rate: f64,
    on_ground: bool,
}

impl SimulatedTraffic {
    /// The `index`-th target of a fleet, spread in bearing, range and altitude
    pub fn new(index: usize) -> Self {
        let index_f = index as f64;
        SimulatedTraffic {
            bearing: normalize(index_f * 37.0),
            distance: 200.0 + (index_f * 1500.0) % 12_000.0,
            altitude: if index % 5 == 4 {
                0.0
            } else {
                CRUISE_ALTITUDE - 2000.0 + (index_f * 700.0) % 4000.0
            },
            orbit_rate: 0.2 + (index % 3) as f64 * 0.15,
            on_ground: index % 5 == 4,
        }
    }

    pub fn fleet(count: usize) -> Vec<Self> {
        (0..count).map(Self::new).collect()
    }

    pub fn report(&self, own_altitude: f64) -> TrafficReport {
        TrafficReport {
            bearing: self.bearing,
            distance: self.distance,
            altitude: self.altitude,
            altitude_delta: self.altitude - own_altitude,
            on_ground: self.on_ground,
        }
    }

    pub fn simulate(&mut self) {
        self.bearing = normalize(self.bearing + self.orbit_rate);
    }
}
