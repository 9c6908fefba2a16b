use clap::{Parser, Subcommand};
use replog_core::format::{format_clock, format_date_time, format_duration};
use replog_core::timer::{TickOutcome, EXPIRY_GRACE};
use replog_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "replog")]
#[command(about = "Workout logging from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start logging a workout session
    Log {
        /// Workout type (cardio, strength, yoga, hiit, mobility)
        workout_type: String,
    },

    /// Show finished workouts, most recent first
    History,

    /// Show totals across all finished workouts
    Stats,

    /// Export history to a CSV file
    Export {
        /// Output file (defaults to history.csv in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the workout type catalog
    Types,
}

fn main() -> Result<()> {
    replog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let errors = catalog::validate(built_in_catalog());
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Log { workout_type } => cmd_log(&data_dir, &workout_type, &config),
        Commands::History => cmd_history(&data_dir, &config),
        Commands::Stats => cmd_stats(&data_dir, &config),
        Commands::Export { out } => cmd_export(&data_dir, out),
        Commands::Types => cmd_types(),
    }
}

fn open_store(data_dir: &std::path::Path, config: &Config) -> HistoryStore {
    let sink = JsonHistoryFile::new(data_dir.join("history.json"));
    HistoryStore::open(Box::new(sink))
        .with_calories_per_minute(config.stats.calories_per_minute)
}

fn cmd_log(data_dir: &std::path::Path, workout_type: &str, config: &Config) -> Result<()> {
    let workout_type: WorkoutType = workout_type.parse().map_err(|_| {
        Error::Other(format!(
            "Unknown workout type '{}'. Try one of: cardio, strength, yoga, hiit, mobility",
            workout_type
        ))
    })?;
    let info = workout_type_info(workout_type);

    let mut store = open_store(data_dir, config);
    let mut session = WorkoutSession::new(workout_type, config.session.default_rest_seconds);
    let mut rest = RestTimer::new(config.session.default_rest_seconds);
    let mut last_tick = Instant::now();

    println!("{} {} session started", info.icon, info.label);
    println!("Type 'help' for commands, 'finish' when done.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        drive_rest_timer(&mut rest, &mut last_tick);
        prompt(&session, &rest)?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                // stdin closed without finish/discard - abandon the session
                session.discard();
                println!("\nSession discarded.");
                return Ok(());
            }
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts.as_slice() {
            [] => Ok(()),
            ["help"] => {
                print_help();
                Ok(())
            }
            ["suggest"] => {
                for name in &info.suggested_exercises {
                    println!("  {}", name);
                }
                Ok(())
            }
            ["status"] => {
                print_status(&session);
                Ok(())
            }
            ["add", name @ ..] if !name.is_empty() => {
                match session.add_exercise(&name.join(" "))? {
                    Some(_) => println!("Added."),
                    None => println!("Exercise name is required."),
                }
                Ok(())
            }
            ["edit", n] => edit_exercise_flow(&mut session, n, &mut lines),
            ["del", n] => {
                if let Some(id) = resolve_exercise(&session, n) {
                    if confirm("Remove this exercise?", &mut lines)? {
                        session.delete_exercise(id)?;
                        println!("Removed.");
                    }
                }
                Ok(())
            }
            ["set", n] => {
                if let Some(id) = resolve_exercise(&session, n) {
                    session.add_set(id)?;
                    println!("Set added.");
                }
                Ok(())
            }
            ["upd", n, s, field, value] => update_set_command(&mut session, n, s, field, value),
            ["done", n, s] => {
                toggle_set_command(&mut session, &mut rest, &mut last_tick, n, s)
            }
            ["rest", "skip"] => {
                rest.skip();
                println!("Rest skipped.");
                Ok(())
            }
            ["rest", preset] => {
                match preset.parse::<u32>() {
                    Ok(d) if REST_PRESETS.contains(&d) => {
                        match rest.select_preset(d) {
                            Some(d) => {
                                session.set_default_rest(d);
                                println!("Rest duration set to {}s.", d);
                            }
                            // Re-selecting the current preset restarts the countdown
                            None => println!("Rest restarted at {}s.", d),
                        }
                        last_tick = Instant::now();
                    }
                    _ => println!("Presets: {:?}", REST_PRESETS),
                }
                Ok(())
            }
            ["finish"] => match session.finish() {
                Ok(workout) => {
                    tracing::info!("Finished workout {}", workout.id);
                    print_summary(&workout, config);
                    store.append(workout);
                    println!("\n\u{2713} Workout saved!");
                    return Ok(());
                }
                Err(Error::EmptyWorkout) => {
                    println!("Add at least one exercise before finishing your workout.");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ["discard"] => {
                if confirm("Discard this workout?", &mut lines)? {
                    session.discard();
                    println!("Workout discarded.");
                    return Ok(());
                }
                Ok(())
            }
            _ => {
                println!("Unknown command. Type 'help' for commands.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            // Bad indices and ids are user typos here, not fatal
            println!("Error: {}", e);
        }
    }
}

/// Advance the rest countdown by however many whole seconds have passed
/// since the last prompt. Expiry auto-dismisses after the grace delay.
fn drive_rest_timer(rest: &mut RestTimer, last_tick: &mut Instant) {
    if !rest.is_running() {
        *last_tick = Instant::now();
        return;
    }

    let elapsed = last_tick.elapsed().as_secs();
    for _ in 0..elapsed {
        if rest.tick() == TickOutcome::Expired {
            println!("\nRest complete!");
            std::thread::sleep(EXPIRY_GRACE);
            rest.dismiss();
            break;
        }
    }
    *last_tick = Instant::now();
}

fn prompt(session: &WorkoutSession, rest: &RestTimer) -> Result<()> {
    let mut line = format!(
        "[{} | {}/{} sets",
        format_duration(session.elapsed_seconds()),
        session.completed_sets(),
        session.total_sets(),
    );
    if rest.is_running() {
        line.push_str(&format!(" | rest {}", format_clock(rest.remaining())));
    }
    line.push_str("] > ");

    print!("{}", line);
    io::stdout().flush()?;
    Ok(())
}

fn resolve_exercise(session: &WorkoutSession, n: &str) -> Option<Uuid> {
    let index = n.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
    match index.and_then(|i| session.exercises().get(i)) {
        Some(exercise) => Some(exercise.id),
        None => {
            println!("No exercise #{}. Use 'status' to list exercises.", n);
            None
        }
    }
}

fn edit_exercise_flow(
    session: &mut WorkoutSession,
    n: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let Some(id) = resolve_exercise(session, n) else {
        return Ok(());
    };

    let form = ExerciseForm {
        name: read_field("Name", lines)?,
        sets: read_field("Sets", lines)?,
        reps: read_field("Reps", lines)?,
        weight: read_field("Weight (optional)", lines)?,
        duration: read_field("Duration (optional)", lines)?,
    };

    match form.parse() {
        Ok(fields) => {
            session.edit_exercise(id, &fields)?;
            println!("Updated.");
        }
        Err(errors) => {
            for (field, message) in errors.iter() {
                println!("  {}: {}", field, message);
            }
            println!("Edit cancelled.");
        }
    }
    Ok(())
}

fn read_field(
    label: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<String> {
    print!("  {}: ", label);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => Ok(String::new()),
    }
}

fn update_set_command(
    session: &mut WorkoutSession,
    n: &str,
    s: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    let Some(id) = resolve_exercise(session, n) else {
        return Ok(());
    };
    let Some(set_index) = s.parse::<usize>().ok().and_then(|s| s.checked_sub(1)) else {
        println!("Bad set number '{}'.", s);
        return Ok(());
    };

    let update = match field {
        "weight" => match value.parse::<f64>() {
            Ok(w) if w >= 0.0 => SetUpdate::Weight(w),
            _ => {
                println!("Enter a valid weight.");
                return Ok(());
            }
        },
        "reps" => match value.parse::<u32>() {
            Ok(r) => SetUpdate::Reps(r),
            Err(_) => {
                println!("Enter a whole number of reps.");
                return Ok(());
            }
        },
        other => {
            println!("Unknown field '{}'. Use weight or reps.", other);
            return Ok(());
        }
    };

    session.update_set(id, set_index, update)?;
    println!("Updated.");
    Ok(())
}

fn toggle_set_command(
    session: &mut WorkoutSession,
    rest: &mut RestTimer,
    last_tick: &mut Instant,
    n: &str,
    s: &str,
) -> Result<()> {
    let Some(id) = resolve_exercise(session, n) else {
        return Ok(());
    };
    let Some(set_index) = s.parse::<usize>().ok().and_then(|s| s.checked_sub(1)) else {
        println!("Bad set number '{}'.", s);
        return Ok(());
    };

    match session.toggle_set_complete(id, set_index)? {
        Some(signal) => {
            rest.start(signal.rest_seconds);
            *last_tick = Instant::now();
            println!(
                "Set complete. Rest: {} ('rest skip' to dismiss, 'rest 30|60|90|120' to change)",
                format_clock(signal.rest_seconds)
            );
        }
        None => println!("Set unchecked."),
    }
    Ok(())
}

fn confirm(
    question: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add <name>                 add an exercise (one default set)");
    println!("  suggest                    list suggested exercises for this type");
    println!("  edit <n>                   edit exercise #n via form");
    println!("  del <n>                    remove exercise #n");
    println!("  set <n>                    add a set to exercise #n");
    println!("  upd <n> <s> weight|reps <v>  update set #s of exercise #n");
    println!("  done <n> <s>               toggle set #s complete (starts rest)");
    println!("  rest skip | rest <secs>    dismiss or re-preset the rest timer");
    println!("  status                     show the current exercise list");
    println!("  finish                     save the workout");
    println!("  discard                    abandon the workout");
}

fn print_status(session: &WorkoutSession) {
    if session.exercises().is_empty() {
        println!("No exercises yet. 'add <name>' to start tracking.");
        return;
    }

    for (i, exercise) in session.exercises().iter().enumerate() {
        println!("{}. {}", i + 1, exercise.name);
        for (j, set) in exercise.sets.iter().enumerate() {
            let mark = if set.completed { "\u{2713}" } else { " " };
            println!(
                "   [{}] set {}: {} kg x {}",
                mark,
                j + 1,
                set.weight,
                set.reps
            );
        }
    }
}

fn print_summary(workout: &Workout, config: &Config) {
    let info = workout_type_info(workout.workout_type);
    let minutes = workout.duration_seconds as f64 / 60.0;
    let calories = (minutes * config.stats.calories_per_minute).round() as u64;

    println!("\n\u{256D}\u{2500}\u{2500} Workout Complete \u{2500}\u{2500}\u{256E}");
    println!("  {} {}", info.icon, info.label);
    println!("  Duration:  {}", format_duration(workout.duration_seconds));
    println!("  Exercises: {}", workout.exercises.len());
    println!(
        "  Sets:      {}/{}",
        workout.completed_sets(),
        workout.total_sets()
    );
    println!("  Volume:    {} kg", workout.total_volume());
    println!("  Est. calories: {}", calories);
}

fn cmd_history(data_dir: &std::path::Path, config: &Config) -> Result<()> {
    let store = open_store(data_dir, config);

    if store.is_empty() {
        println!("No workouts yet. Start one with 'replog log <type>'.");
        return Ok(());
    }

    for workout in store.list() {
        let info = workout_type_info(workout.workout_type);
        println!(
            "{} {}  {}  {} \u{00B7} {} exercises \u{00B7} {} sets",
            info.icon,
            info.label,
            format_date_time(workout.completed_at),
            format_duration(workout.duration_seconds),
            workout.exercises.len(),
            workout.total_sets(),
        );
    }
    Ok(())
}

fn cmd_stats(data_dir: &std::path::Path, config: &Config) -> Result<()> {
    let store = open_store(data_dir, config);
    let stats = store.stats();

    let week_ago = chrono::Utc::now() - chrono::Duration::days(7);
    let this_week = store
        .list()
        .iter()
        .filter(|w| w.completed_at >= week_ago)
        .count();

    println!("Workouts:       {}", stats.total_workouts);
    println!("This week:      {}", this_week);
    println!(
        "Total time:     {}",
        format_duration(stats.total_duration_seconds)
    );
    println!("Exercises:      {}", stats.total_exercises);
    println!("Sets:           {}", stats.total_sets);
    println!("Est. calories:  {}", stats.estimated_calories);
    Ok(())
}

fn cmd_export(data_dir: &std::path::Path, out: Option<PathBuf>) -> Result<()> {
    let sink = JsonHistoryFile::new(data_dir.join("history.json"));
    let workouts = sink.load();

    let out = out.unwrap_or_else(|| data_dir.join("history.csv"));
    let count = history_to_csv(&out, &workouts)?;

    println!("\u{2713} Exported {} workouts to {}", count, out.display());
    Ok(())
}

fn cmd_types() -> Result<()> {
    for info in built_in_catalog() {
        println!("{} {} ({})", info.icon, info.label, info.id);
        println!("    {}", info.description);
        println!("    Suggested: {}", info.suggested_exercises.join(", "));
    }
    Ok(())
}
