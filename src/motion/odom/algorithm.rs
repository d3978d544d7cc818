use crate::units::{Angle, Length, consts::RADIAN};

/// Shortest signed change between two absolute headings.
pub(super) fn heading_delta(previous: Angle, current: Angle) -> Angle { (current - previous).wrapped() }

/// Local (forward, lateral) chord travelled by the centre of rotation.
///
/// Wheel travel is first corrected for the wheel's offset from the centre,
/// then the arc is converted into its chord. See equation 6 of
/// http://thepilons.ca/wp-content/uploads/2018/10/Tracking.pdf
pub(super) fn local_displacement(
    forward_travel: Length,
    lateral_travel: Length,
    delta_theta: Angle,
    forward_offset: Length,
    lateral_offset: Length,
) -> (Length, Length) {
    let swept = delta_theta.convert(RADIAN);
    let forward = forward_travel + forward_offset * swept;
    let lateral = lateral_travel + lateral_offset * swept;
    let chord = (delta_theta / 2.0).sinc().raw();
    (forward * chord, lateral * chord)
}

/// Rotates a local (forward, right) vector into the global frame.
pub(super) fn rotate_vec(x: Length, y: Length, t: Angle) -> (Length, Length) {
    let (sin, cos) = (t.sin().raw(), t.cos().raw());
    (x * cos - y * sin, x * sin + y * cos)
}
