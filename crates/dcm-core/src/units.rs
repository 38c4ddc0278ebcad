// dcm-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, ElectricalResistance as UomElectricalResistance,
    Inductance as UomInductance, MomentOfInertia as UomMomentOfInertia, Time as UomTime,
    Torque as UomTorque,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Current = UomElectricCurrent;
pub type Inductance = UomInductance;
pub type Inertia = UomMomentOfInertia;
pub type Resistance = UomElectricalResistance;
pub type Time = UomTime;
pub type Torque = UomTorque;
pub type Voltage = UomElectricPotential;

#[inline]
pub fn amp(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn kgm2(v: f64) -> Inertia {
    use uom::si::moment_of_inertia::kilogram_square_meter;
    Inertia::new::<kilogram_square_meter>(v)
}

#[inline]
pub fn nm(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Shaft speed in rpm to rad/s.
pub fn rpm_to_rad_s(v: f64) -> f64 {
    use uom::si::angular_velocity::radian_per_second;
    rpm(v).get::<radian_per_second>()
}

/// Shaft speed in rad/s to rpm.
pub fn rad_s_to_rpm(v: f64) -> f64 {
    use uom::si::angular_velocity::revolution_per_minute;
    rad_per_s(v).get::<revolution_per_minute>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _i = amp(19.7);
        let _v = volt(240.0);
        let _r = ohm(1.086);
        let _l = henry(0.01216);
        let _j = kgm2(0.04251);
        let _t = nm(40.0);
        let _w = rad_per_s(183.0);
        let _dt = s(0.001);
    }

    #[test]
    fn rpm_conversion_round_trip() {
        let w = rpm_to_rad_s(1750.0);
        assert!((w - 1750.0 * 2.0 * std::f64::consts::PI / 60.0).abs() < 1e-9);
        assert!((rad_s_to_rpm(w) - 1750.0).abs() < 1e-9);
    }
}
