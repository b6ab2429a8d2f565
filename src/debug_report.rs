use kbs::{CompletionMetrics, EnumerationMetrics, GroupOrderVerbose, Spelled};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled { format!("{code}{s}{}", ansi::RESET) } else { s.to_string() }
    }

    fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
        self.wrap(s.as_ref(), color)
    }

    fn bold(&self, s: impl AsRef<str>) -> String {
        self.wrap(s.as_ref(), ansi::BOLD)
    }

    fn dim(&self, s: impl AsRef<str>) -> String {
        self.wrap(s.as_ref(), ansi::DIM)
    }
}

const ROUND_LIMIT: usize = 12;

pub fn print_run(run: &GroupOrderVerbose, palette: &Palette) {
    let details = &run.details;
    let alphabet: Vec<String> = details.alphabet.iter().map(|g| g.to_string()).collect();
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Presentation on {{{}}}", alphabet.join(", ")), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Completion ━━━", ansi::GRAY));
    print_completion(&details.completion, palette);

    println!("\n{}", palette.paint("━━━ Enumeration ━━━", ansi::GRAY));
    print_enumeration(&details.enumeration, palette);

    println!("\n{}", palette.paint("━━━ Elements ━━━", ansi::GRAY));
    for (idx, nf) in details.samples.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{idx}]"), ansi::GRAY), palette.paint(Spelled(nf).to_string(), ansi::GREEN));
    }
    if run.order > details.samples.len() {
        println!("  {}", palette.dim(format!("... +{} more", run.order - details.samples.len())));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Completion: {}  │  Enumeration: {}",
        palette.paint(format!("{:?}", run.elapsed), ansi::GREEN),
        palette.paint(format!("{:?}", details.completion.total), ansi::CYAN),
        palette.dim(format!("{:?}", details.enumeration.total)),
    );
    println!();
}

pub fn print_rules(rules: &[String], palette: &Palette) {
    println!("\n{}", palette.paint(format!("━━━ Rules ({}) ━━━", rules.len()), ansi::GRAY));
    for (idx, rule) in rules.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{idx}]"), ansi::GRAY), palette.paint(rule, ansi::BLUE));
    }
    println!();
}

fn print_completion(metrics: &CompletionMetrics, palette: &Palette) {
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("seed:"),
        palette.paint(metrics.seed_rules.to_string(), ansi::YELLOW),
        palette.dim("added:"),
        palette.paint(metrics.added().to_string(), ansi::GREEN),
        palette.dim("removed:"),
        palette.paint(metrics.removed().to_string(), ansi::YELLOW),
    );

    for (idx, round) in metrics.rounds.iter().enumerate().take(ROUND_LIMIT) {
        println!(
            "  {} {}  {} {}  {} {}",
            palette.paint(format!("Round {}:", idx + 1), ansi::BLUE),
            if round.added > 0 {
                palette.paint(format!("+{} rules", round.added), ansi::GREEN)
            } else {
                palette.dim("+0 rules")
            },
            palette.dim("pairs:"),
            palette.paint(format!("{} ({} joined)", round.pairs, round.joined), ansi::YELLOW),
            palette.dim("│ size:"),
            palette.paint(format!("{} (-{})  {:?}", round.rules, round.removed, round.duration), ansi::CYAN),
        );
    }
    if metrics.rounds.len() > ROUND_LIMIT {
        println!("  {}", palette.dim(format!("... +{} more rounds", metrics.rounds.len() - ROUND_LIMIT)));
    }
}

fn print_enumeration(metrics: &EnumerationMetrics, palette: &Palette) {
    for (idx, level) in metrics.levels.iter().enumerate() {
        println!(
            "  {} {}  {} {}",
            palette.paint(format!("Level {}:", idx + 1), ansi::BLUE),
            if level.discovered > 0 {
                palette.paint(format!("✓ {} new", level.discovered), ansi::GREEN)
            } else {
                palette.dim("✗ 0 new")
            },
            palette.dim(format!("of {} candidates", level.candidates)),
            palette.dim(format!("{:?}", level.duration)),
        );
    }
}
