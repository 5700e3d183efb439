// Copyright (c) 2026 matrixdeck contributors

use std::io::IsTerminal;

use clap::Parser;

use crate::palette::{SCHEMES, SCHEME_NAMES};

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "default-background")]
    DefaultBackground,
    #[value(name = "transparent")]
    Transparent,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "matrixdeck", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "tick-ms",
        default_value_t = 100,
        help_heading = "ANIMATION",
        help = "Rain tick period in ms (min 10 max 5000)"
    )]
    pub tick_ms: u16,

    #[arg(
        long = "rotate-ms",
        default_value_t = 5000,
        help_heading = "ANIMATION",
        help = "Color scheme rotation period in ms (min 100 max 60000)"
    )]
    pub rotate_ms: u16,

    #[arg(
        long = "seed",
        help_heading = "ANIMATION",
        help = "Seed the rain RNG for a reproducible run"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, default-background, transparent)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "list-schemes",
        help_heading = "HELP",
        help = "List the rotating color schemes and exit"
    )]
    pub list_schemes: bool,

    #[arg(
        long = "check-bitcolor",
        help_heading = "HELP",
        help = "Print detected terminal color capability and exit"
    )]
    pub check_bitcolor: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_schemes() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mROTATING COLOR SCHEMES (in cycle order):\x1b[0m");
    } else {
        println!("ROTATING COLOR SCHEMES (in cycle order):");
    }
    println!();
    println!("IDX  NAME          RGB");
    for (i, (name, (r, g, b))) in SCHEME_NAMES.iter().zip(SCHEMES).enumerate() {
        println!("{:<4} {:<13} {:>3},{:>3},{:>3}", i, name, r, g, b);
    }
}
