//! Runs the fixed workload under every scheduler and compares the results.
//!
//! ```text
//! cargo run --example basic_simulation
//! ```

use disksim::prelude::*;

fn main() -> Result<(), ConfigError> {
    let config = SimConfig::default();
    let selections = [
        ("FIFO", None),
        ("LOOK", Some("ASC")),
        ("LOOK", Some("DESC")),
        ("FLOOK", Some("ASC")),
        ("FLOOK", Some("DESC")),
    ];

    println!("{:<14} {:>10} {:>12} {:>8}", "scheduler", "seek ms", "total ms", "head");
    for (name, direction) in selections {
        let kind = SchedulerKind::from_selection(name, direction)?;
        let driver = SimulationDriver::with_kind(config.clone(), kind, literal_workload())?;

        let recorder = SharedRecorder::new();
        let mut sink = Tee(recorder.clone(), LogSink);
        let report = driver.run(&mut sink);

        println!(
            "{:<14} {:>10.3} {:>12.3} {:>8}",
            kind.to_string(),
            report.schedule_time,
            report.total_simulation_time,
            report.final_head
        );
        debug_assert_eq!(
            recorder
                .events()
                .iter()
                .filter(|e| matches!(e, SimEvent::HeadMoved { .. }))
                .count(),
            report.request_times.len()
        );
    }

    let mut cache = SegmentedCache::new(config.segments());
    for track in 1..=11 {
        if let Some(evicted) = cache.touch(track).evicted {
            println!("\ntouching {track} evicted buffer {evicted}");
        }
    }
    print!("{cache}");

    Ok(())
}
