use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use frontline_common::MovementTarget;
use frontline_input::{ControlConfig, InputScript, InputState, MovementResolver};
use frontline_render::{DebugTextRenderer, Renderer};
use frontline_scene::{Scene, SceneLayout};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frontline-cli", about = "Headless runner for frontline input scripts")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the active key map
    Info {
        #[command(flatten)]
        controls: ControlArgs,
    },
    /// Run an input script and print the resulting scene
    Simulate {
        /// Script, e.g. "+w tick*10 -w +a tick*5"
        #[arg(short, long)]
        script: String,
        /// Print a frame after every tick instead of only the last one
        #[arg(long)]
        every_tick: bool,
        /// Include ground and light in printed frames
        #[arg(long)]
        layout: bool,
        #[command(flatten)]
        controls: ControlArgs,
    },
    /// Run a script, replay its event log and compare state hashes
    Replay {
        #[arg(short, long)]
        script: String,
        #[command(flatten)]
        controls: ControlArgs,
    },
}

#[derive(Args)]
struct ControlArgs {
    /// Control config file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Object moved by input: player or camera
    #[arg(short, long)]
    target: Option<MovementTarget>,
    /// Distance moved per tick per held binding
    #[arg(long, allow_negative_numbers = true)]
    step: Option<f32>,
}

impl ControlArgs {
    /// Config file values, overridden by any flags given.
    fn resolve(&self) -> anyhow::Result<ControlConfig> {
        let mut config = match &self.config {
            Some(path) => ControlConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ControlConfig::default(),
        };
        if let Some(target) = self.target {
            config.movement_target = target;
        }
        if let Some(step) = self.step {
            config.step_size = step;
        }
        config.validate()?;
        Ok(config)
    }
}

struct Run {
    scene: Scene,
    input: InputState,
}

fn run_script(
    config: &ControlConfig,
    script: &InputScript,
    mut on_tick: impl FnMut(&Scene),
) -> Run {
    let resolver = MovementResolver::from_config(config);
    let target = config.movement_target;
    let mut input = InputState::new(config.key_map());
    let mut scene = Scene::new(SceneLayout::default());
    script.play(&mut input, |state| {
        scene.step(state, &resolver, target);
        on_tick(&scene);
    });
    Run { scene, input }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { controls } => {
            let config = controls.resolve()?;
            println!("frontline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", frontline_input::crate_info());
            println!("render: {}", frontline_render::crate_info());
            println!(
                "controls: target={} step={}",
                config.movement_target, config.step_size
            );
            println!("key map:");
            for (key, binding) in config.key_map().iter() {
                println!("  {key:<12} -> {binding}");
            }
        }
        Commands::Simulate {
            script,
            every_tick,
            layout,
            controls,
        } => {
            let config = controls.resolve()?;
            let script = InputScript::parse(&script)?;
            let renderer = DebugTextRenderer {
                show_layout: layout,
            };
            tracing::info!(
                ticks = script.tick_count(),
                movement_target = %config.movement_target,
                step = config.step_size,
                "simulating"
            );

            let run = run_script(&config, &script, |scene| {
                if every_tick {
                    print!("{}", renderer.render(scene));
                }
            });
            if !every_tick {
                print!("{}", renderer.render(&run.scene));
            }
            let held: Vec<&str> = run.input.held_keys().collect();
            if !held.is_empty() {
                println!("Still held: {}", held.join(" "));
            }
        }
        Commands::Replay { script, controls } => {
            let config = controls.resolve()?;
            let script = InputScript::parse(&script)?;
            println!(
                "Deterministic replay: target={}, ticks={}",
                config.movement_target,
                script.tick_count()
            );

            let run = run_script(&config, &script, |_| {});
            let replayed = Scene::replay(SceneLayout::default(), run.scene.events());

            let target = config.movement_target;
            let p = run.scene.position_of(target);
            let r = replayed.position_of(target);
            println!(
                "Run:    tick={}, {target}=({:.2}, {:.2}, {:.2}), hash={:#x}",
                run.scene.tick(),
                p.x,
                p.y,
                p.z,
                run.scene.state_hash()
            );
            println!(
                "Replay: tick={}, {target}=({:.2}, {:.2}, {:.2}), hash={:#x}",
                replayed.tick(),
                r.x,
                r.y,
                r.z,
                replayed.state_hash()
            );
            if run.scene.state_hash() != replayed.state_hash() {
                anyhow::bail!("replay diverged from the original run");
            }
            println!("Match: OK");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(args: &[&str]) -> ControlArgs {
        let argv = ["frontline-cli", "info"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Info { controls } => controls,
            _ => unreachable!(),
        }
    }

    fn write_config(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("frontline_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn no_flags_give_defaults() {
        let config = controls(&[]).resolve().unwrap();
        assert_eq!(config, ControlConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let path = write_config(
            "override.yaml",
            "movementTarget: camera\nstepSize: 0.5\naliases:\n  i: MoveForward\n",
        );
        let path_arg = path.to_str().unwrap();

        let from_file = controls(&["--config", path_arg]).resolve().unwrap();
        assert_eq!(from_file.movement_target, MovementTarget::Camera);
        assert_eq!(from_file.step_size, 0.5);

        let overridden = controls(&["--config", path_arg, "--target", "player", "--step", "0.25"])
            .resolve()
            .unwrap();
        assert_eq!(overridden.movement_target, MovementTarget::Player);
        assert_eq!(overridden.step_size, 0.25);
        assert_eq!(overridden.aliases.len(), 1);
    }

    #[test]
    fn negative_step_flag_is_rejected() {
        let args = controls(&["--step", "-1"]);
        assert_eq!(args.step, Some(-1.0));
        assert!(args.resolve().is_err());
    }

    #[test]
    fn negative_step_flag_overrides_valid_file() {
        let path = write_config("valid.json", r#"{ "stepSize": 0.5 }"#);
        let args = controls(&["--config", path.to_str().unwrap(), "--step=-0.5"]);
        assert!(args.resolve().is_err());
    }

    #[test]
    fn unknown_target_flag_fails_to_parse() {
        let argv = ["frontline-cli", "info", "--target", "light"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn run_script_moves_configured_target() {
        let config = ControlConfig {
            movement_target: MovementTarget::Camera,
            step_size: 1.0,
            ..ControlConfig::default()
        };
        let script = InputScript::parse("+d tick*3 -d tick").unwrap();
        let mut ticks = 0;
        let run = run_script(&config, &script, |_| ticks += 1);
        assert_eq!(ticks, 4);
        assert_eq!(run.scene.camera().position.x, 3.0);
        assert_eq!(run.input.held_keys().count(), 0);
    }
}
