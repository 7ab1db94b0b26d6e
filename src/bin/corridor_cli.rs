#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("corridor_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use course_engine::corridor::{
        CorridorOptions, Scenario, build_corridor_mesh, corridor_snapshot,
        normalize_snapshot_text, write_obj,
    };
    use course_engine::geom::{GeomMesh, MeshDiagnostics};
    use course_engine::parse::course_xml;
    use course_engine::path::Path as CoursePath;
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const USAGE: &str = r#"corridor_cli (course-engine)

USAGE:
  corridor_cli list
  corridor_cli run <scenario|all> [options]
  corridor_cli build <course.xml> [options]

SCENARIOS:
  straight_floor
  quarter_corner
  banked_hairpin
  double_wall_s_curve
  sloped_ramp

OPTIONS (run, build):
  --out-dir <dir>    Write <name>.obj and/or <name>.snap to this dir (required for `run all`)
  --obj <path>       Write OBJ (single scenario or course only)
  --snap <path>      Write snapshot (single scenario or course only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "build" => cmd_build(&mut args),
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

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    struct OutputArgs {
        out_dir: Option<PathBuf>,
        obj_path: Option<PathBuf>,
        snap_path: Option<PathBuf>,
        overwrite: bool,
        write_obj: bool,
        write_snap: bool,
    }

    /// `None` when help was requested.
    fn parse_output_args(args: &mut Args) -> Result<Option<OutputArgs>, String> {
        let mut output = OutputArgs {
            out_dir: None,
            obj_path: None,
            snap_path: None,
            overwrite: false,
            write_obj: true,
            write_snap: true,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => output.out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => output.obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => output.snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => output.overwrite = true,
                "--no-obj" => output.write_obj = false,
                "--no-snap" => output.write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(None);
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = output.out_dir.as_ref() {
            if output.obj_path.is_some() || output.snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !output.write_obj && !output.write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }
            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;
        }

        Ok(Some(output))
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;
        let Some(output_args) = parse_output_args(args)? else {
            return Ok(());
        };

        if scenario_name == "all" {
            let Some(dir) = output_args.out_dir.as_deref() else {
                return Err("`run all` requires --out-dir".to_string());
            };
            for scenario in Scenario::ALL {
                let output = run_scenario(*scenario)?;
                write_to_dir(&output, dir, &output_args)?;
            }
            return Ok(());
        }

        let scenario = Scenario::from_name(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;
        let output = run_scenario(scenario)?;
        emit(&output, &output_args)
    }

    fn cmd_build(args: &mut Args) -> Result<(), String> {
        let course_path = PathBuf::from(args.next().ok_or("missing course file")?);
        let Some(output_args) = parse_output_args(args)? else {
            return Ok(());
        };

        let xml = fs::read_to_string(&course_path)
            .map_err(|e| format!("read {}: {e}", course_path.display()))?;
        let course = course_xml::parse_str(&xml)
            .map_err(|e| format!("parse {}: {e}", course_path.display()))?;
        let name = course_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("course")
            .to_string();

        let output = corridor_output(name, &course.path, &course.corridor)?;
        emit(&output, &output_args)
    }

    fn emit(output: &CorridorOutput, args: &OutputArgs) -> Result<(), String> {
        if let Some(dir) = args.out_dir.as_deref() {
            return write_to_dir(output, dir, args);
        }

        if let Some(path) = args.snap_path.as_deref() {
            write_text_file(path, &output.snapshot, args.overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = args.obj_path.as_deref() {
            write_obj_file(path, &output.mesh, &output.name, args.overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(output);
        Ok(())
    }

    fn write_to_dir(output: &CorridorOutput, dir: &Path, args: &OutputArgs) -> Result<(), String> {
        if args.write_snap {
            let path = dir.join(format!("{}.snap", output.name));
            write_text_file(&path, &output.snapshot, args.overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if args.write_obj {
            let path = dir.join(format!("{}.obj", output.name));
            write_obj_file(&path, &output.mesh, &output.name, args.overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(output);
        Ok(())
    }

    fn report(output: &CorridorOutput) {
        eprintln!(
            "{}: vertices={} triangles={} | {}",
            output.name,
            output.mesh.vertex_count(),
            output.mesh.triangle_count(),
            output.diagnostics.summary()
        );
        for warning in &output.diagnostics.warnings {
            eprintln!("  warning: {warning}");
        }
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            let _ = writeln!(msg, "  {}", scenario.name());
        }
        msg
    }

    fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        ensure_writable(path, overwrite)?;
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;
        ensure_writable(path, overwrite)?;

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);
        write_obj(&mut w, mesh, name).map_err(|e| format!("write obj: {e}"))?;
        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    struct CorridorOutput {
        name: String,
        mesh: GeomMesh,
        diagnostics: MeshDiagnostics,
        snapshot: String,
    }

    fn corridor_output(
        name: String,
        path: &CoursePath,
        options: &CorridorOptions,
    ) -> Result<CorridorOutput, String> {
        let (mesh, diagnostics) = build_corridor_mesh(path, options).map_err(|e| e.to_string())?;
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        let snap = corridor_snapshot(&name, path, options, &mesh, &diagnostics);

        Ok(CorridorOutput {
            name,
            mesh,
            diagnostics,
            snapshot: snap,
        })
    }

    fn run_scenario(scenario: Scenario) -> Result<CorridorOutput, String> {
        let (path, options) = scenario.build();
        corridor_output(scenario.name().to_string(), &path, &options)
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
