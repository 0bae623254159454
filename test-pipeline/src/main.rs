use std::{env, fs::{self, File}, io::Write, path::Path};
use pipeline::{EventSink, PipelineConfig, SensorCaps, SensorSample, StepPipeline, StepSource};

static RESULTS_DIR: &str = "analysis";

/// Sink that logs pipeline events and appends every detected step to the
/// trace's steps CSV.
///
struct CsvSink {
    steps_file: File,
}

impl EventSink for CsvSink {
    fn on_initialized(&mut self, gyro_available: bool, accel_available: bool) {
        log::info!(
            "Pipeline initialized, gyro: {}, accel: {}",
            gyro_available, accel_available
        );
    }

    fn on_step_detected(&mut self, count: u32, timestamp_ms: i64, source: StepSource) {
        log::info!("Step {} via {:?} -> {} ms", count, source, timestamp_ms);
        self.steps_file.write(format!(
            "{},{},{:?}\n",
            count, timestamp_ms, source
        ).as_bytes()).unwrap();
    }

    fn request_haptic_pulse(&mut self, duration_ms: u32) {
        // No motor on this side, just show that the pulse was asked for.
        log::debug!("Haptic pulse requested: {} ms", duration_ms);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        panic!("Expected CSV file to read samples from");
    }

    // Open the input CSV file. Expected columns: kind,timestamp_ms,x,y,z
    // where kind is either "gyro" or "accel".
    let in_path = Path::new(&args[1]);
    let in_file = File::open(in_path).unwrap();

    // Every input CSV file gets its own folder in the results directory.
    let out_dir = in_path.file_name().unwrap().to_str().unwrap().to_string().replace(".csv", "");
    let out_dir = format!("{}/{}", RESULTS_DIR, out_dir);
    fs::create_dir_all(&out_dir).unwrap();

    // Create a file to save the detected steps to.
    let mut steps_file = File::create(format!("{}/{}", out_dir, "steps.csv")).unwrap();
    steps_file.write(b"count,timestamp_ms,source\n").unwrap();

    let mut sink = CsvSink { steps_file };
    let mut pipe = StepPipeline::new(PipelineConfig::default(), SensorCaps::both());
    pipe.initialize(&mut sink);

    // Loop over every line in the input CSV, in recorded order.
    let mut reader = csv::Reader::from_reader(in_file);
    for result in reader.deserialize::<(String, i64, f32, f32, f32)>() {
        let (kind, timestamp_ms, x, y, z) = result.unwrap();

        let sample = match kind.as_str() {
            "gyro" => SensorSample::gyro(x, y, z, timestamp_ms),
            "accel" => SensorSample::accel(x, y, z, timestamp_ms),
            other => panic!("Unknown sensor kind: {}", other),
        };

        // A rejected sample is skipped, the rest of the trace still runs.
        if let Err(err) = pipe.process_sample(&sample, &mut sink) {
            log::warn!("{}", err);
        }
    }

    log::info!(
        "Replay done: {} steps, final angle {:.2} deg",
        pipe.step_count(),
        pipe.estimated_angle_deg()
    );
}
