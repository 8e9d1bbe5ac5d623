//! # Pose and path publishing
//!
//! Sends the robot's position to the console for the field diagram and forwards waypoints the
//! drivers click on the diagram to the path follower.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::mpsc::{Sender, SyncSender};

use log::{debug, error};
use nalgebra::Point2;

use comms_if::dash::{keys, UNSET_SENTINEL};
use util::maths::wrap_2pi;

use super::Dashboard;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A field relative coordinate.
pub type Point = Point2<f64>;

/// Position and heading of the robot on the field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    /// Field relative position
    pub position: Point,

    /// Heading in radians, always in [0, 2pi).
    heading_rad: f64,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Producer side of the path follower's waypoint queue.
///
/// Implementations must be safe to use while the consumer is draining the queue, and may block
/// while the queue is full.
pub trait WaypointSink {
    fn enqueue(&self, point: Point) -> Result<(), EnqueueError>;
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EnqueueError {
    #[error("The waypoint queue has been closed by the path follower")]
    QueueClosed,
}

/// What happened to a waypoint request during a cycle.
#[derive(Debug)]
pub enum WaypointOutcome {
    /// The console has no pending request.
    NotRequested,

    /// The point was added to the queue.
    Enqueued(Point),

    /// A request was pending but the point could not be queued, and has been dropped.
    Dropped(EnqueueError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Create a new pose, wrapping the heading into [0, 2pi).
    pub fn new(position: Point, heading_rad: f64) -> Self {
        Self {
            position,
            heading_rad: wrap_2pi(heading_rad),
        }
    }

    /// Create a pose from an IMU fused heading in degrees, [-180, 180], clockwise positive.
    ///
    /// The rotation sense is kept, so a heading of -90 degrees becomes 3pi/2.
    pub fn from_fused_heading(position: Point, heading_deg: f64) -> Self {
        Self::new(position, heading_deg.to_radians())
    }

    pub fn heading_rad(&self) -> f64 {
        self.heading_rad
    }
}

impl WaypointSink for Sender<Point> {
    fn enqueue(&self, point: Point) -> Result<(), EnqueueError> {
        self.send(point).map_err(|_| EnqueueError::QueueClosed)
    }
}

impl WaypointSink for SyncSender<Point> {
    fn enqueue(&self, point: Point) -> Result<(), EnqueueError> {
        self.send(point).map_err(|_| EnqueueError::QueueClosed)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Publish the robot's current pose.
pub fn publish_pose(dash: &Dashboard, pose: &Pose) {
    let table = dash.table();

    table.put_number(keys::CURRENT_X, pose.position.x);
    table.put_number(keys::CURRENT_Y, pose.position.y);
    table.put_number(keys::CURRENT_ANGLE, pose.heading_rad);
}

/// Forward a waypoint requested by the console to the path follower.
///
/// A request is pending when both `targetX` and `targetY` are set. The point that is queued is
/// read from `fieldX` and `fieldY`, not from the target keys.
///
/// A failure to queue is reported and the point dropped, this never returns an error.
pub fn drain_requested_waypoint<Q>(dash: &Dashboard, queue: &Q) -> WaypointOutcome
where
    Q: WaypointSink + ?Sized,
{
    let table = dash.table();

    // Exact comparison, the sentinel is a written value rather than a computed one
    if table.get_number(keys::TARGET_X, UNSET_SENTINEL) == UNSET_SENTINEL
        || table.get_number(keys::TARGET_Y, UNSET_SENTINEL) == UNSET_SENTINEL
    {
        return WaypointOutcome::NotRequested;
    }

    let point = Point::new(
        table.get_number(keys::FIELD_X, UNSET_SENTINEL),
        table.get_number(keys::FIELD_Y, UNSET_SENTINEL),
    );

    match queue.enqueue(point) {
        Ok(()) => {
            debug!("Queued waypoint ({:.3}, {:.3})", point.x, point.y);
            WaypointOutcome::Enqueued(point)
        }
        Err(e) => {
            error!(
                "Could not queue the waypoint ({:.3}, {:.3}), it has been dropped: {}",
                point.x, point.y, e
            );
            WaypointOutcome::Dropped(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::table::TableStore;
    use std::f64::consts::PI;
    use std::sync::mpsc::{channel, sync_channel};

    #[test]
    fn test_publish_pose() {
        let dash = Dashboard::new(&TableStore::new());
        publish_pose(&dash, &Pose::new(Point::new(1.25, -3.5), PI / 2.0));

        assert_eq!(dash.table().get_number("currentX", 0.0), 1.25);
        assert_eq!(dash.table().get_number("currentY", 0.0), -3.5);
        assert_eq!(dash.table().get_number("currentAngle", 0.0), PI / 2.0);
    }

    #[test]
    fn test_heading_range() {
        let p = Point::origin();

        assert!((Pose::from_fused_heading(p, -90.0).heading_rad() - 1.5 * PI).abs() < 1e-12);
        assert!((Pose::from_fused_heading(p, 180.0).heading_rad() - PI).abs() < 1e-12);
        assert_eq!(Pose::from_fused_heading(p, 0.0).heading_rad(), 0.0);
        assert_eq!(Pose::new(p, 2.0 * PI).heading_rad(), 0.0);

        for deg in [-180.0, -179.9, -0.1, 45.0, 179.9] {
            let h = Pose::from_fused_heading(p, deg).heading_rad();
            assert!(h >= 0.0 && h < 2.0 * PI, "{} deg gave {} rad", deg, h);
        }
    }

    #[test]
    fn test_no_request_enqueues_nothing() {
        let (tx, rx) = channel();

        let cases: [&[(&str, f64)]; 4] = [
            &[],
            &[("targetX", 2.0)],
            &[("targetX", 2.0), ("targetY", -1.0)],
            &[("targetX", -1.0), ("targetY", 4.0), ("fieldX", 1.0), ("fieldY", 1.0)],
        ];

        for entries in cases.iter() {
            let dash = Dashboard::new(&TableStore::new());
            for (k, v) in entries.iter() {
                dash.table().put_number(k, *v);
            }

            assert!(matches!(
                drain_requested_waypoint(&dash, &tx),
                WaypointOutcome::NotRequested
            ));
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_request_enqueues_field_point() {
        let (tx, rx) = channel();
        let dash = Dashboard::new(&TableStore::new());

        dash.table().put_number("targetX", 2.0);
        dash.table().put_number("targetY", 4.0);
        dash.table().put_number("fieldX", 5.5);
        dash.table().put_number("fieldY", 6.5);

        assert!(matches!(
            drain_requested_waypoint(&dash, &tx),
            WaypointOutcome::Enqueued(p) if p == Point::new(5.5, 6.5)
        ));

        assert_eq!(rx.try_recv().unwrap(), Point::new(5.5, 6.5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_request_without_field_point_uses_sentinel() {
        let (tx, rx) = sync_channel(1);
        let dash = Dashboard::new(&TableStore::new());

        dash.table().put_number("targetX", 0.0);
        dash.table().put_number("targetY", 0.0);

        drain_requested_waypoint(&dash, &tx);

        assert_eq!(rx.try_recv().unwrap(), Point::new(-1.0, -1.0));
    }

    #[test]
    fn test_closed_queue_drops_point() {
        let (tx, rx) = channel::<Point>();
        drop(rx);

        let dash = Dashboard::new(&TableStore::new());
        dash.table().put_number("targetX", 1.0);
        dash.table().put_number("targetY", 1.0);

        assert!(matches!(
            drain_requested_waypoint(&dash, &tx),
            WaypointOutcome::Dropped(EnqueueError::QueueClosed)
        ));
    }
}
