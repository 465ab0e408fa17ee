//! Main bot-side executable entry point.
//! 
//! # Architecture
//! 
//! The general execution methodology consists of:
//! 
//!     - Initialise all modules
//!     - Main loop:
//!         - Input acquisition:
//!             - Joystick state
//!             - Arm potentiometer
//!         - Drop off macro processing
//!         - Control processing:
//!             - Drive control
//!             - Intake control
//!             - Arm control
//!             - Light signalling
//!         - Demand output and light frame output
//!         - Archiving
//! 
//! # Modules
//! 
//! All modules (e.g. `arm_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!     

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use bot_lib::{
    arm_ctrl::PowerStrategy,
    arm_sim::ArmSim,
    ctrl_cycle,
    data_store::DataStore,
    light_sig::{LogEmitter, SignalEmitter},
    mech_client::{LogDriver, MechDriver},
    params::BotExecParams,
};
use comms_if::eqpt::mech::ActId;
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{ScriptInterpreter, ScriptedInput},
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTURES
// ---------------------------------------------------------------------------

/// Stacker bot control executable
#[derive(Debug, StructOpt)]
#[structopt(name = "bot_exec")]
struct Opt {
    /// Input script to drive the bot with
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Stop after this many cycles
    #[structopt(long)]
    max_cycles: Option<u64>,

    /// Arm power strategy to use instead of the one in the parameters (proportional or
    /// incremental)
    #[structopt(long)]
    strategy: Option<PowerStrategy>,

    /// Log every cycle's demands
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "bot_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger, per-cycle traces only when asked for
    let min_level = match opt.verbose {
        true => LevelFilter::Trace,
        false => LevelFilter::Debug,
    };
    logger_init(min_level, &[("bot_lib::arm_sim", LevelFilter::Debug)], &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Stacker Bot Executable\n");
    info!("Running on: {}", host::get_platform());
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: BotExecParams = util::params::load(
        "bot_exec.toml"
    ).wrap_err("Could not load exec params")?;

    let cycle_period = exec_params.cycle_period();

    info!("Exec parameters loaded, cycle period {} ms", exec_params.cycle_period_ms);

    // ---- INITIALISE INPUT SCRIPT ----

    info!("Loading script from {:?}", opt.script);

    let mut si = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?
        .with_end_hold(exec_params.script_end_hold_s);

    info!(
        "Loaded script lasts {:.02} s and contains {} states\n",
        si.get_duration(),
        si.get_num_pending()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.drop_mgr.init(("drop_mgr.toml", cycle_period), &session)
        .wrap_err("Failed to initialise DropMgr")?;
    info!("DropMgr init complete");

    ds.drive_ctrl.init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    ds.intake_ctrl.init("intake_ctrl.toml", &session)
        .wrap_err("Failed to initialise IntakeCtrl")?;
    info!("IntakeCtrl init complete");

    ds.arm_ctrl.init("arm_ctrl.toml", &session)
        .wrap_err("Failed to initialise ArmCtrl")?;
    if let Some(strategy) = opt.strategy {
        ds.arm_ctrl.set_strategy(strategy);
    }
    info!("ArmCtrl init complete, using {:?} strategy", ds.arm_ctrl.params().strategy);

    ds.light_sig.init("light_sig.toml", &session)
        .wrap_err("Failed to initialise LightSig")?;
    info!("LightSig init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    let mut arm_sim = ArmSim::load("arm_sim.toml")
        .wrap_err("Failed to initialise ArmSim")?;
    let mut mech_driver = LogDriver::new();
    let mut light_emitter = LogEmitter::new();

    info!("Equipment initialised (simulated arm, logged demands and light)");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let script_start_instant = Instant::now();

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- DATA INPUT ----

        match si.get_input(script_start_instant.elapsed().as_secs_f64()) {
            ScriptedInput::Some(joy) => ds.joy = joy,
            ScriptedInput::EndOfScript => {
                info!("End of input script reached, stopping");
                break
            }
        }

        ds.arm_measured = arm_sim.measured();

        // ---- CONTROL ALGORITHM PROCESSING ----

        ctrl_cycle::proc(&mut ds);

        // ---- OUTPUT ----

        if let Err(e) = mech_driver.send_demands(&ds.mech_dems) {
            warn!("Could not send demands: {}", e);
        }

        if let Some(ref frame) = ds.light_frame {
            if let Err(e) = light_emitter.emit(frame) {
                warn!("Could not write the light frame: {}", e);
            }
        }

        arm_sim.step(ds.mech_dems.get(ActId::ArmLeft));

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.arm_ctrl.write(ds.num_cycles) {
            warn!("Could not write ArmCtrl archive: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s", 
                    (cycle_dur - cycle_period).as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
                ds.num_cycle_overruns += 1;

                if exec_params.max_consec_cycle_overruns > 0
                    && ds.num_consec_cycle_overruns > exec_params.max_consec_cycle_overruns
                {
                    raise_error!(
                        "More than {} consecutive cycle overruns!",
                        exec_params.max_consec_cycle_overruns
                    );
                }
            }
        }

        ds.cycle_end();

        if let Some(max) = opt.max_cycles {
            if ds.num_cycles >= max {
                info!("Maximum number of cycles ({}) reached, stopping", max);
                break
            }
        }
    }

    // ---- SHUTDOWN ----

    if let Err(e) = mech_driver.stop() {
        warn!("Could not stop the actuators: {}", e);
    }

    info!(
        "End of execution after {} cycles ({:.02} s), {} overruns, {} light frames",
        ds.num_cycles,
        Duration::from_millis(exec_params.cycle_period_ms * ds.num_cycles).as_secs_f64(),
        ds.num_cycle_overruns,
        light_emitter.num_emitted()
    );

    Ok(())
}
