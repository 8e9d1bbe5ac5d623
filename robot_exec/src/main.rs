//! Main robot-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Open the dashboard tables and acquire the IMU
//!     - Main loop:
//!         - IMU sensing and collision detection
//!         - Autonomous arming (reads the operator selection once)
//!         - Telemetry publishing:
//!             - Diagnostics
//!             - Pose
//!         - Waypoint requests forwarded to the path follower
//!
//! The executable stops when the match timer reaches zero.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, error, info, warn};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::table::TableStore;
use robot_lib::{
    dashboard::{
        self, CollisionSource, Dashboard, DiagSources, MatchTimer, Point, Pose, WaypointOutcome,
        WaypointSink,
    },
    data_store::DataStore,
    imu::{Imu, ImuSource, SimImu},
    params::RobotExecParams,
    sim::{CountdownTimer, IdleEquipment},
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("robot_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: RobotExecParams = util::params::load("robot_exec.toml")
        .wrap_err("Could not load exec params")?;
    params.validate().wrap_err("Invalid exec params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DASHBOARD ----

    let store = TableStore::new();
    let dash = Dashboard::new(&store);

    dashboard::publish_auto_options(&dash, &params.auto_options);
    dashboard::set_controls_reversed(&dash, false);

    info!("Dashboard initialised");

    // ---- INITIALISE IMU ----

    // Failure to acquire the IMU is reported but not fatal, the robot runs without it
    let mut imu = match Imu::initialize(|| connect_imu(params.imu.source), &params.imu) {
        Ok(i) => Some(i),
        Err(e) => {
            error!("IMU unavailable, continuing without it: {}", e);
            None
        }
    };

    // ---- INITIALISE PATH FOLLOWER ----

    let (waypoint_sink, waypoint_rx): (Box<dyn WaypointSink>, Receiver<Point>) =
        match params.waypoint_queue_capacity {
            0 => {
                let (tx, rx) = mpsc::channel::<Point>();
                (Box::new(tx), rx)
            }
            n => {
                let (tx, rx) = mpsc::sync_channel::<Point>(n);
                (Box::new(tx), rx)
            }
        };

    let follower_jh = thread::spawn(move || path_follower(waypoint_rx));

    info!("Path follower started");

    // ---- INITIALISE SUBSYSTEMS ----

    let match_timer = CountdownTimer::start(params.match_length_s);
    let equipment = IdleEquipment::default();

    let mut ds = DataStore::default();

    let cycle_period = Duration::from_secs_f64(params.cycle_period_s);
    let cycle_frequency_hz = 1.0 / params.cycle_period_s;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        ds.cycle_start(cycle_frequency_hz);

        // ---- DATA INPUT ----

        if let Some(ref mut i) = imu {
            i.sensor_mut().step(params.cycle_period_s);
            i.update_collision();

            ds.pose = Some(Pose::from_fused_heading(
                Point::new(i.displacement_x(), i.displacement_y()),
                i.fused_heading(),
            ));
        }

        // ---- AUTONOMY ----

        if ds.auto_selection.is_none() {
            ds.arm_auto(&dash);
        }

        // ---- TELEMETRY ----

        let collision: &dyn CollisionSource = match imu {
            Some(ref i) => i,
            None => &equipment,
        };
        let sources = DiagSources {
            match_timer: &match_timer,
            collision,
            temperature: &equipment,
            climber: &equipment,
            pneumatics: &equipment,
        };
        dashboard::publish_diagnostics(&dash, &sources);

        if let Some(ref pose) = ds.pose {
            dashboard::publish_pose(&dash, pose);
        }

        if let WaypointOutcome::Dropped(_) =
            dashboard::drain_requested_waypoint(&dash, waypoint_sink.as_ref())
        {
            ds.num_dropped_waypoints += 1;
        }

        if ds.is_1_hz_cycle {
            debug!("Dashboard holds {} entries", store.len());
        }

        // ---- MATCH END ----

        if match_timer.match_time_s() <= 0.0 {
            info!("Match timer expired, stopping");
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    // Closing the queue stops the path follower
    drop(waypoint_sink);
    if follower_jh.join().is_err() {
        warn!("Path follower thread panicked");
    }

    info!(
        "End of execution after {} cycles, {} waypoints dropped",
        ds.num_cycles, ds.num_dropped_waypoints
    );

    Ok(())
}

/// Acquire the IMU from the configured source.
fn connect_imu(source: ImuSource) -> Result<SimImu, String> {
    match source {
        ImuSource::Sim => Ok(SimImu::new()),
        ImuSource::None => Err(String::from("no inertial sensor is fitted")),
    }
}

/// Consumer side of the waypoint queue.
///
/// Following the path is handled by the drive base, here waypoints are only logged as they
/// arrive. Returns once every sender has been dropped.
fn path_follower(rx: Receiver<Point>) {
    for point in rx.iter() {
        info!("Path follower got waypoint ({:.3}, {:.3})", point.x, point.y);
    }

    debug!("Waypoint queue closed");
}
