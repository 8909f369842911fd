use clap::{arg, command, Parser, Subcommand};
use crossterm::{
    cursor::MoveRight,
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rubix::{
    config::SolverConfig,
    facelet::CubeState,
    scramble::{gen_scramble, Scramble},
    solver::{solve as solver, SolveResult},
};
use spinners::Spinner;
use std::{
    error::Error,
    io::{self, stdout},
    time::{Duration, Instant},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube with the evolutionary Thistlethwaite search")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(long, default_value_t = rubix::constants::POP_SIZE)]
        pop_size: usize,

        #[arg(long, default_value_t = rubix::constants::NUM_SURVIVORS)]
        survivors: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        workers: Option<usize>,

        /// Give up after this many seconds
        #[arg(short, long)]
        timeout: Option<f32>,

        #[arg(short, long)]
        verbose: bool,

        #[arg(short, long)]
        preview: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        preview: bool,
    },
}

struct SolveArgs {
    config: SolverConfig,
    verbose: bool,
    preview: bool,
    json: bool,
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    args: &SolveArgs,
) -> Result<(), Box<dyn Error>> {
    let cube = if let Some(scramble) = scramble {
        scramble.parse::<Scramble>()?.cube()
    } else if let Some(facelet) = facelet {
        CubeState::try_from(facelet.as_str())?
    } else {
        return Ok(());
    };
    if args.preview {
        print_net(&cube)?;
    }
    solve_state(&cube, args)
}

fn solve_state(cube: &CubeState, args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let spinner =
        (!args.json).then(|| Spinner::new(spinners::Spinners::Dots, "Solving".to_owned()));
    let result = solver(cube, &args.config);
    let end = Instant::now();
    if let Some(mut spinner) = spinner {
        spinner.stop_with_newline();
    }
    let result = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    println!("Solution: {}", result.notation);
    println!("Move count: {}", result.solution.len());
    println!("Solve time: {:?}", result.solve_time);
    println!("Total time: {:?}", end - start);
    if args.verbose {
        print_details(&result);
    }
    Ok(())
}

fn print_details(result: &SolveResult) {
    println!("Generations: {}", result.attempts);
    println!("Resets: {}", result.resets);
    for (i, (m, frame)) in result
        .solution
        .iter()
        .zip(result.frames.iter().skip(1))
        .enumerate()
    {
        println!("{:>3}. {:<3} {}", i + 1, m.to_string(), frame);
    }
}

fn color_to_termcolor(label: char) -> TermColor {
    match label {
        'U' => TermColor::White,
        'R' => TermColor::Red,
        'F' => TermColor::Green,
        'D' => TermColor::DarkYellow,
        'L' => TermColor::Magenta,
        _ => TermColor::Blue,
    }
}

fn print_row(row: &[char], offset: u16) -> Result<(), io::Error> {
    if offset != 0 {
        execute!(stdout(), MoveRight(offset))?;
    }
    let cells: String = row
        .iter()
        .map(|&c| format!("{}  ", SetBackgroundColor(color_to_termcolor(c))))
        .collect();
    println!("{cells}{}", SetBackgroundColor(TermColor::Reset));
    Ok(())
}

/// Print the cube net: U above the L F R B band, D below.
fn print_net(cube: &CubeState) -> Result<(), io::Error> {
    let net = cube.facelet_snapshot(&['L', 'R', 'F', 'B', 'U', 'D']);

    println!();
    for row in net[0..9].chunks(3) {
        print_row(row, 6)?; // U
    }
    for row in net[9..45].chunks(12) {
        print_row(row, 0)?; // L F R B
    }
    for row in net[45..54].chunks(3) {
        print_row(row, 6)?; // D
    }
    println!();

    Ok(())
}

fn scramble(seed: Option<u64>, preview: bool) -> Result<(), Box<dyn Error>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (cube, ss) = gen_scramble(&mut rng);
    println!("Scramble: {}", ss.notation);
    println!("Facelets: {cube}");
    if preview {
        print_net(&cube)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            pop_size,
            survivors,
            seed,
            workers,
            timeout,
            verbose,
            preview,
            json,
        }) => {
            let mut config = SolverConfig {
                pop_size: *pop_size,
                num_survivors: *survivors,
                seed: *seed,
                timeout: timeout.map(|t| Duration::from_secs_f32(t.max(0.0))),
                ..Default::default()
            };
            if let Some(workers) = workers {
                config.workers = *workers;
            }
            let args = SolveArgs {
                config,
                verbose: *verbose,
                preview: *preview,
                json: *json,
            };
            solve(scramble, facelet, &args)
        }
        Some(Commands::Scramble { seed, preview }) => scramble(*seed, *preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        log::debug!("command failed: {error:?}");
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
