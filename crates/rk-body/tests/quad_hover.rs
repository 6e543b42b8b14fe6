//! Integration test: four-rotor X frame driven through the body accumulator.
//!
//! Checks that:
//! - equal throttle cancels yaw and lever-arm moments
//! - differential spin throttle produces a yaw moment with the expected sign
//! - thrust falls with altitude through the shared environment

use rk_body::RigidBody;
use rk_core::units::m;
use rk_core::{PhysicsContributor, RecordingReporter, RotorId, Vec3};
use rk_env::Environment;
use rk_rotor::{RotorActuator, RotorGeometry, RotorParams, SpinDirection};

const DT: f64 = 0.003;
const ARM: f64 = 0.2;

fn quad(env: &Environment) -> RigidBody<RotorActuator<'_>> {
    let layout = [
        (Vec3::new(ARM, ARM, 0.0), SpinDirection::CounterClockwise),
        (Vec3::new(-ARM, -ARM, 0.0), SpinDirection::CounterClockwise),
        (Vec3::new(ARM, -ARM, 0.0), SpinDirection::Clockwise),
        (Vec3::new(-ARM, ARM, 0.0), SpinDirection::Clockwise),
    ];
    let mut body = RigidBody::new("quad");
    for (i, (position, spin)) in layout.into_iter().enumerate() {
        let geometry = RotorGeometry::new(position, Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let rotor = RotorActuator::builder()
            .id(RotorId::from_index(i as u32))
            .geometry(geometry)
            .spin_direction(spin)
            .params(RotorParams::default())
            .environment(env)
            .build()
            .unwrap();
        body.add_contributor(rotor).unwrap();
    }
    body.reset();
    body
}

fn run(body: &mut RigidBody<RotorActuator<'_>>, steps: usize) -> rk_core::Wrench {
    let mut last = body.wrench();
    for _ in 0..steps {
        last = body.update(DT).unwrap();
    }
    last
}

#[test]
fn reset_body_has_zero_wrench() {
    let env = Environment::sea_level();
    let body = quad(&env);
    assert_eq!(body.len(), 4);
    assert_eq!(body.wrench().force.norm(), 0.0);
    assert_eq!(body.wrench().torque.norm(), 0.0);
}

#[test]
fn equal_throttle_is_pure_lift() {
    let env = Environment::sea_level();
    let mut body = quad(&env);
    for rotor in body.contributors_mut() {
        rotor.set_control_signal(0.7);
    }
    let w = run(&mut body, 1000);

    let single = body.contributors()[0].output().thrust;
    assert!(single > 0.0);
    assert!((w.force.z + 4.0 * single).abs() < 1e-9);
    assert!(w.force.x.abs() < 1e-12 && w.force.y.abs() < 1e-12);
    assert!(w.torque.norm() < 1e-9, "unexpected moment {:?}", w.torque);
}

#[test]
fn clockwise_bias_yaws_the_body() {
    let env = Environment::sea_level();
    let mut body = quad(&env);
    for rotor in body.contributors_mut() {
        let cmd = match rotor.spin_direction() {
            SpinDirection::Clockwise => 0.9,
            SpinDirection::CounterClockwise => 0.5,
        };
        rotor.set_control_signal(cmd);
    }
    let w = run(&mut body, 1000);

    // Clockwise reaction torque is positive along the rotor normal (-z)
    assert!(w.torque.z < 0.0);
    // Diagonal pairs keep roll and pitch balanced
    assert!(w.torque.x.abs() < 1e-9);
    assert!(w.torque.y.abs() < 1e-9);
}

#[test]
fn lift_drops_with_altitude() {
    let env = Environment::sea_level();
    let mut body = quad(&env);
    for rotor in body.contributors_mut() {
        rotor.set_control_signal(1.0);
    }
    let sea = run(&mut body, 1000).force.z;

    env.set_altitude(m(3_000.0)).unwrap();
    let high = run(&mut body, 1).force.z;
    assert!(high.abs() < sea.abs());
    let ratio = body.contributors()[0].density_ratio();
    assert!((high / sea - ratio).abs() < 1e-12);
}

#[test]
fn single_rotor_can_be_addressed_by_name() {
    let env = Environment::sea_level();
    let mut body = quad(&env);
    body.contributor_mut("rotor2").unwrap().set_control_signal(1.0);
    let w = run(&mut body, 1000);
    // rotor2 sits at (+arm, -arm): lifting it rolls and pitches the body
    assert!(w.force.z < 0.0);
    assert!(w.torque.x.abs() > 0.0);
    assert!(w.torque.y.abs() > 0.0);

    let mut reporter = RecordingReporter::new();
    body.report(&mut reporter);
    assert!(reporter.group_value("rotor2", "thrust").unwrap().as_f64() > 0.0);
    assert_eq!(reporter.group_value("rotor0", "thrust").unwrap().as_f64(), 0.0);
    assert_eq!(body.contributors()[2].name(), "rotor2");
}
