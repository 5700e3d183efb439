// Copyright (c) 2026 matrixdeck contributors

mod cell;
mod config;
mod console;
mod frame;
mod grid;
mod palette;
mod runtime;
mod screen;
mod stream;
mod terminal;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{print_list_schemes, Args, ColorBg};
use crate::console::Console;
use crate::frame::Frame;
use crate::grid::{viewport_width, RainGrid};
use crate::palette::build_palette;
use crate::runtime::ColorMode;
use crate::terminal::{restore_terminal_best_effort, Terminal};

/// The active-nodes readout re-rolls on this cadence.
const NODES_REFRESH: Duration = Duration::from_millis(5000);

fn build_info() -> &'static str {
    env!("MATRIXDECK_BUILD")
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn color_mode_label(m: ColorMode) -> &'static str {
    match m {
        ColorMode::TrueColor => "24-bit truecolor",
        ColorMode::Color256 => "8-bit (256-color)",
        ColorMode::Mono => "mono",
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let args = Args::parse();

    if args.list_schemes {
        print_list_schemes();
        return Ok(());
    }

    if args.check_bitcolor {
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        let term = env::var("TERM").unwrap_or_default();
        let auto = detect_color_mode_auto();
        let effective = detect_color_mode(&args);

        println!("BITCOLOR CHECK:");
        println!(
            "  COLORTERM: {}",
            if colorterm.is_empty() {
                "(unset)"
            } else {
                &colorterm
            }
        );
        println!(
            "  TERM: {}",
            if term.is_empty() { "(unset)" } else { &term }
        );
        println!("  auto_detected: {}", color_mode_label(auto));
        if args.colormode.is_some() {
            println!("  forced: {}", color_mode_label(effective));
        }
        println!("  effective: {}", color_mode_label(effective));
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let color_mode = detect_color_mode(&args);
    let default_background = matches!(
        args.color_bg,
        ColorBg::DefaultBackground | ColorBg::Transparent
    );

    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });
    let tick_ms = require_u16_range("--tick-ms", args.tick_ms, 10, 5000);
    let rotate_ms = require_u16_range("--rotate-ms", args.rotate_ms, 100, 60000);

    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut grid = RainGrid::new(viewport_width(w), args.seed);
    let mut console = Console::new();
    let mut shell_rng = StdRng::from_os_rng();
    console.refresh_nodes(&mut shell_rng);

    let mut palette = build_palette(grid.scheme_index(), color_mode, default_background);
    let mut frame = Frame::new(w, h, palette.bg);

    let tick_period = Duration::from_millis(tick_ms as u64);
    let rotate_period = Duration::from_millis(rotate_ms as u64);

    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let now = Instant::now();
    let mut next_tick = now + tick_period;
    let mut next_rotate = now + rotate_period;
    let mut next_nodes = now + NODES_REFRESH;

    let mut running = true;
    let mut needs_draw = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }

        let mut pending_resize: Option<(u16, u16)> = None;
        while Terminal::poll_event(Duration::from_millis(0))? {
            match Terminal::read_event()? {
                Event::Resize(nw, nh) => pending_resize = Some((nw, nh)),
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    if args.screensaver {
                        running = false;
                        break;
                    }
                    match k.code {
                        KeyCode::Esc | KeyCode::Char('q') => running = false,
                        KeyCode::Char('t') => {
                            console.add_message("INITIATING TRACE PROGRAM");
                            needs_draw = true;
                        }
                        KeyCode::Char('s') => {
                            console.add_message("SCANNING NETWORK");
                            needs_draw = true;
                        }
                        KeyCode::Char('d') => {
                            console.add_message("DECRYPTING SIGNALS");
                            needs_draw = true;
                        }
                        KeyCode::Char(' ') => {
                            grid.reset();
                            needs_draw = true;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            grid.handle_resize(viewport_width(nw));
            frame = Frame::new(nw, nh, palette.bg);
            needs_draw = true;
        }

        let now = Instant::now();
        if now >= next_tick {
            grid.tick();
            next_tick += tick_period;
            if now > next_tick {
                next_tick = now + tick_period;
            }
            needs_draw = true;
        }
        if now >= next_rotate {
            grid.rotate_scheme();
            palette = build_palette(grid.scheme_index(), color_mode, default_background);
            next_rotate += rotate_period;
            if now > next_rotate {
                next_rotate = now + rotate_period;
            }
            needs_draw = true;
        }
        if now >= next_nodes {
            console.refresh_nodes(&mut shell_rng);
            next_nodes += NODES_REFRESH;
            if now > next_nodes {
                next_nodes = now + NODES_REFRESH;
            }
            needs_draw = true;
        }

        if needs_draw {
            screen::draw(&mut frame, &grid, &console, &palette);
            term.draw(&mut frame)?;
            needs_draw = false;
        }

        let now = Instant::now();
        let mut next_deadline = next_tick.min(next_rotate).min(next_nodes);
        if let Some(end) = end_time {
            next_deadline = next_deadline.min(end);
        }
        if next_deadline > now {
            let _ = Terminal::poll_event(next_deadline - now)?;
        }
    }

    drop(term);
    Ok(())
}
