use std::{path::PathBuf, time::Duration};

use crate::app::renderer::{Glyphs, Pacing, RenderOptions};

/// Run parameters, taken from positional arguments and a few environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Program name as invoked, echoed in the summary line.
    pub program: String,
    pub width: usize,
    pub height: usize,
    /// `None` means a seed is drawn from the OS at run time.
    pub seed: Option<u64>,
    /// Sleep between animation frames.
    pub delay: Duration,
    pub animate: bool,
    pub glyphs: Glyphs,
    pub color: bool,
    /// Wait for Enter between frames instead of sleeping.
    pub step: bool,
    /// Where to write logs. No logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: env!("CARGO_PKG_NAME").to_string(),
            width: Config::DEFAULT_SIZE,
            height: Config::DEFAULT_SIZE,
            seed: None,
            delay: Config::DEFAULT_DELAY,
            animate: true,
            glyphs: Glyphs::default(),
            color: true,
            step: false,
            log_file: None,
        }
    }
}

impl Config {
    pub const DEFAULT_SIZE: usize = 10;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);

    /// Reads `[program] [width] [height] [seed] [delay] [no-animate]` from the process
    /// arguments, then applies the environment.
    pub fn from_env() -> Self {
        Config::from_args(std::env::args()).with_env(|key| std::env::var(key).ok())
    }

    /// Parses positional arguments. The first item is the program name.
    ///
    /// Numbers are read the way C's `strtol` with base 0 reads them (`0x` hex, leading-`0`
    /// octal, decimal otherwise), ignoring trailing junk; anything unreadable counts as 0.
    /// A fifth argument of any value turns the animation off.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = Config::default();
        if let Some(program) = args.first() {
            config.program = program.clone();
        }
        if let Some(width) = args.get(1) {
            config.width = to_size(parse_c_long(width));
        }
        config.height = match args.get(2) {
            Some(height) => to_size(parse_c_long(height)),
            None => config.width,
        };
        // Negative seeds wrap, as a C cast to an unsigned type would
        config.seed = args.get(3).map(|seed| parse_c_long(seed) as u64);
        if let Some(delay) = args.get(4) {
            config.delay = to_delay(parse_c_double(delay));
        }
        config.animate = args.len() <= 5;
        config
    }

    /// Applies `MAZE_GLYPHS`, `NO_COLOR`, `DEBUG` and `MAZE_LOG`, looked up through `var`.
    pub fn with_env<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match var("MAZE_GLYPHS").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("ascii") => self.glyphs = Glyphs::Ascii,
            Some(v) if v.eq_ignore_ascii_case("block") => self.glyphs = Glyphs::Block,
            _ => {}
        }
        if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
        if var("DEBUG").as_deref() == Some("1") {
            self.step = true;
        }
        if let Some(path) = var("MAZE_LOG").filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
        self
    }

    pub fn render_options(&self) -> RenderOptions {
        let pacing = if self.step {
            Pacing::Step
        } else if self.delay.is_zero() {
            Pacing::None
        } else {
            Pacing::Delay(self.delay)
        };
        RenderOptions {
            glyphs: self.glyphs,
            color: self.color,
            animate: self.animate,
            pacing,
        }
    }
}

fn to_size(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn to_delay(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}

/// Reads a leading integer like C's `strtol(s, NULL, 0)`.
/// Out-of-range values saturate; no digits gives 0.
pub fn parse_c_long(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let bytes = rest.as_bytes();
    let (radix, digits) = match bytes {
        [b'0', b'x' | b'X', d, ..] if d.is_ascii_hexdigit() => (16, &rest[2..]),
        [b'0', ..] => (8, rest),
        _ => (10, rest),
    };

    // Accumulate as a negative number so i64::MIN is reachable
    let mut value: i64 = 0;
    let mut overflow = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        match value
            .checked_mul(radix as i64)
            .and_then(|v| v.checked_sub(d as i64))
        {
            Some(v) => value = v,
            None => {
                overflow = true;
                break;
            }
        }
    }

    match (overflow, negative) {
        (true, true) => i64::MIN,
        (true, false) => i64::MAX,
        (false, true) => value,
        (false, false) => value.checked_neg().unwrap_or(i64::MAX),
    }
}

/// Reads a leading floating-point number like C's `strtod`. No number gives 0.
pub fn parse_c_double(s: &str) -> f64 {
    let s = s.trim_start();
    // Longest prefix that parses
    s.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        Config::from_args(args.iter().copied())
    }

    #[test]
    fn test_defaults() {
        let c = config(&["maze"]);
        assert_eq!(c.program, "maze");
        assert_eq!((c.width, c.height), (10, 10));
        assert_eq!(c.seed, None);
        assert_eq!(c.delay, Duration::from_millis(10));
        assert!(c.animate);
    }

    #[test]
    fn test_height_defaults_to_width() {
        let c = config(&["maze", "7"]);
        assert_eq!((c.width, c.height), (7, 7));
        let c = config(&["maze", "7", "3"]);
        assert_eq!((c.width, c.height), (7, 3));
    }

    #[test]
    fn test_all_positionals() {
        let c = config(&["maze", "0x10", "010", "42", "0.5", "x"]);
        assert_eq!((c.width, c.height), (16, 8));
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.delay, Duration::from_millis(500));
        assert!(!c.animate);
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let c = config(&["maze", "abc", "-4", "seed", "fast"]);
        assert_eq!((c.width, c.height), (0, 0));
        assert_eq!(c.seed, Some(0));
        assert_eq!(c.delay, Duration::ZERO);
        assert!(c.animate);
    }

    #[test]
    fn test_parse_c_long() {
        assert_eq!(parse_c_long("42"), 42);
        assert_eq!(parse_c_long("  -17"), -17);
        assert_eq!(parse_c_long("+9"), 9);
        assert_eq!(parse_c_long("0x1F"), 31);
        assert_eq!(parse_c_long("0X1f"), 31);
        assert_eq!(parse_c_long("017"), 15);
        assert_eq!(parse_c_long("019"), 1);
        assert_eq!(parse_c_long("0x"), 0);
        assert_eq!(parse_c_long("0xg"), 0);
        assert_eq!(parse_c_long("12abc"), 12);
        assert_eq!(parse_c_long(""), 0);
        assert_eq!(parse_c_long("-"), 0);
        assert_eq!(parse_c_long("99999999999999999999"), i64::MAX);
        assert_eq!(parse_c_long("-99999999999999999999"), i64::MIN);
        assert_eq!(parse_c_long("-9223372036854775808"), i64::MIN);
    }

    #[test]
    fn test_parse_c_double() {
        assert_eq!(parse_c_double("0.01"), 0.01);
        assert_eq!(parse_c_double(" 2"), 2.0);
        assert_eq!(parse_c_double("1.5s"), 1.5);
        assert_eq!(parse_c_double(".25"), 0.25);
        assert_eq!(parse_c_double("1e-3"), 0.001);
        assert_eq!(parse_c_double("nope"), 0.0);
        assert_eq!(parse_c_double(""), 0.0);
    }

    #[test]
    fn test_negative_seed_wraps() {
        let c = config(&["maze", "5", "5", "-1"]);
        assert_eq!(c.seed, Some(u64::MAX));
    }

    #[test]
    fn test_bad_delays_are_zero() {
        assert_eq!(to_delay(-1.0), Duration::ZERO);
        assert_eq!(to_delay(f64::NAN), Duration::ZERO);
        assert_eq!(to_delay(f64::INFINITY), Duration::ZERO);
        assert_eq!(to_delay(1e30), Duration::ZERO);
    }

    #[test]
    fn test_env() {
        let env = |key: &str| match key {
            "MAZE_GLYPHS" => Some("ASCII".to_string()),
            "NO_COLOR" => Some("1".to_string()),
            "DEBUG" => Some("1".to_string()),
            "MAZE_LOG" => Some("/tmp/maze.log".to_string()),
            _ => None,
        };
        let c = config(&["maze"]).with_env(env);
        assert_eq!(c.glyphs, Glyphs::Ascii);
        assert!(!c.color);
        assert!(c.step);
        assert_eq!(c.log_file, Some(PathBuf::from("/tmp/maze.log")));
        assert_eq!(c.render_options().pacing, Pacing::Step);

        let c = config(&["maze"]).with_env(|_| None);
        assert_eq!(c.glyphs, Glyphs::Block);
        assert!(c.color);
        assert!(!c.step);
        assert_eq!(c.log_file, None);
    }

    #[test]
    fn test_render_options_pacing() {
        let c = config(&["maze", "3", "3", "1", "0"]);
        assert_eq!(c.render_options().pacing, Pacing::None);
        let c = config(&["maze", "3", "3", "1", "0.2", "quiet"]);
        let options = c.render_options();
        assert!(!options.animate);
        assert_eq!(options.pacing, Pacing::Delay(Duration::from_millis(200)));
    }
}
