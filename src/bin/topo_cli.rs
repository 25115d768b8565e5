#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("topo_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use topo_doctor::analysis::{AnalysisError, Category, GeometryRef};
    use topo_doctor::geom::{BBox, MeshSnapshot};
    use topo_doctor::samples;
    use topo_doctor::session::{Session, ViewportController};

    const USAGE: &str = r#"topo_cli (topo-doctor)

USAGE:
  topo_cli list
  topo_cli run <sample|all>
  topo_cli cycle <sample> [--steps N]

COMMANDS:
  list     Print the available sample meshes
  run      Analyze a sample and print statistics, defects and score
  cycle    Analyze a sample, then step the navigator N times (default: one lap)

OPTIONS (cycle):
  --steps <N>        Number of cycle commands to issue
  -h, --help         Show this help
"#;

    /// Prints where the camera would go.
    struct PrintViewport;

    impl ViewportController for PrintViewport {
        fn focus_on(&mut self, region: &BBox, primary: &GeometryRef) {
            let c = region.center();
            println!(
                "    viewport -> {primary} around ({:.3}, {:.3}, {:.3}), diagonal {:.3}",
                c.x,
                c.y,
                c.z,
                region.diagonal()
            );
        }
    }

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for name in samples::NAMES {
                    println!("{name}");
                }
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "cycle" => cmd_cycle(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn load(name: &str) -> Result<MeshSnapshot, String> {
        samples::by_name(name).ok_or_else(|| format!("unknown sample `{name}` (see `topo_cli list`)"))
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let name = args.next().ok_or("missing sample name")?;
        if let Some(extra) = args.next() {
            return Err(format!("unexpected argument `{extra}`\n\n{USAGE}"));
        }

        if name == "all" {
            for sample in samples::NAMES {
                run_one(sample)?;
            }
            return Ok(());
        }
        run_one(&name)
    }

    fn run_one(name: &str) -> Result<(), String> {
        let mesh = load(name)?;
        let session = Session::default();
        session.analyze(&mesh).map_err(describe)?;
        let report = session.report().ok_or("analysis produced no report")?;

        println!("== {name} ==");
        print!("{}", report.stats);
        println!("{}", report.headline());
        for category in [Category::Hole, Category::NGon, Category::Sliver] {
            println!(
                "  {}: {}",
                category.label(),
                report.registry.count_category(category)
            );
        }
        for entry in report.registry.listing() {
            println!("  [{}] {:?}: {}", entry.id, entry.severity, entry.description);
        }
        println!("Health: {}/100 ({:?})", report.score(), report.band());
        if let Some(timing) = report.timing.as_ref() {
            println!("Timing: {:.3} ms", timing.total_ms());
        }
        println!();
        Ok(())
    }

    fn cmd_cycle(args: &mut Args) -> Result<(), String> {
        let name = args.next().ok_or("missing sample name")?;
        let mut steps: Option<usize> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--steps" => {
                    let raw = args.value("--steps")?;
                    steps = Some(
                        raw.parse()
                            .map_err(|e| format!("invalid --steps `{raw}`: {e}"))?,
                    );
                }
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let mesh = load(&name)?;
        let session = Session::default();
        let score = session.analyze(&mesh).map_err(describe)?;
        let total = session.listing().len();
        println!("{name}: {total} defects, health {score}/100");

        let mut viewport = PrintViewport;
        for _ in 0..steps.unwrap_or(total) {
            match session.cycle_next(&mut viewport) {
                Some(target) => println!("  {}", target.progress_label()),
                None => {
                    println!("  nothing to cycle through");
                    break;
                }
            }
        }
        Ok(())
    }

    fn describe(err: AnalysisError) -> String {
        format!("analysis failed: {err}")
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
