//! `pneumo` - CLI for pneumodetect
//!
//! This binary drives the PneumoDetect view-models from the terminal.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;

use pneumodetect::cli::{
    render, Cli, Command, ConfigCommand, CoughCommand, PageCommand, VitalsCommand,
};
use pneumodetect::notify::drain;
use pneumodetect::{init_logging, App, Config, Error, Notice, Result, Route};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = || Config::load_from(cli.config.clone());
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Cough(cmd) => handle_cough(&mut out, config()?, &cmd).await?,
        Command::Vitals(cmd) => handle_vitals(&mut out, config()?, &cmd).await?,
        Command::Page(cmd) => handle_page(&mut out, config()?, &cmd)?,
        Command::Routes => render::routes(&mut out)?,
        Command::Login(cmd) => {
            let (mut app, mut notices) = enter_auth(config()?)?;
            app.login(&cmd.into()).await?;
            finish_auth(&mut out, &app, &mut notices)?;
        }
        Command::Signup(cmd) => {
            let (mut app, mut notices) = enter_auth(config()?)?;
            app.signup(&cmd.into()).await?;
            finish_auth(&mut out, &app, &mut notices)?;
        }
        Command::ForgotPassword => {
            let (app, mut notices) = enter_auth(config()?)?;
            app.forgot_password()?;
            finish_auth(&mut out, &app, &mut notices)?;
        }
        // Reports load failures itself
        Command::Config(cmd) => handle_config(&mut out, cli.config.clone(), cmd)?,
    }
    Ok(())
}

async fn handle_cough<W: Write>(out: &mut W, config: Config, cmd: &CoughCommand) -> Result<()> {
    let (mut app, mut notices) = App::new(config);
    app.follow(Route::CoughAnalysis)?;
    let sim = app
        .cough()
        .ok_or_else(|| Error::internal("cough page mounted without a simulator"))?;

    sim.start_recording()?;

    let mut seen = Vec::new();
    let result = {
        let wait = sim.wait_for_result();
        tokio::pin!(wait);
        loop {
            tokio::select! {
                result = &mut wait => break result?,
                Some(notice) = notices.recv() => {
                    if !cmd.json {
                        render::notice(out, &notice)?;
                    }
                    seen.push(notice);
                }
            }
        }
    };

    for notice in drain(&mut notices) {
        if !cmd.json {
            render::notice(out, &notice)?;
        }
        seen.push(notice);
    }

    if cmd.json {
        render::json(
            out,
            &serde_json::json!({
                "notices": seen,
                "result": result,
                "score": result.score(),
                "advice": result.risk.advice(),
                "details": result.details(),
            }),
        )
    } else {
        render::analysis(out, &result)
    }
}

async fn handle_vitals<W: Write>(out: &mut W, config: Config, cmd: &VitalsCommand) -> Result<()> {
    let (mut app, _notices) = App::new(config);
    app.follow(Route::Vitals)?;
    let sim = app
        .vitals()
        .ok_or_else(|| Error::internal("vitals page mounted without a simulator"))?;

    let mut watcher = sim.subscribe();
    sim.connect()?;

    let mut readings = Vec::new();
    let mut last_sequence = 0;
    while last_sequence < cmd.samples {
        watcher
            .changed()
            .await
            .map_err(|_| Error::internal("vitals stream closed"))?;
        let reading = watcher.borrow_and_update().reading;
        if reading.sequence <= last_sequence {
            continue;
        }
        last_sequence = reading.sequence;
        if !cmd.json {
            render::reading(out, &reading)?;
        }
        readings.push(reading);
    }
    sim.disconnect();

    if cmd.json {
        render::json(out, &readings)?;
    }
    Ok(())
}

fn handle_page<W: Write>(out: &mut W, config: Config, cmd: &PageCommand) -> Result<()> {
    let (mut app, _notices) = App::new(config);
    app.open(cmd.route);
    let content = app.content();
    if cmd.json {
        render::json(out, &content)
    } else {
        render::page(out, app.route(), &content)
    }
}

fn enter_auth(config: Config) -> Result<(App, UnboundedReceiver<Notice>)> {
    let (mut app, notices) = App::new(config);
    app.follow(Route::Auth)?;
    Ok((app, notices))
}

fn finish_auth<W: Write>(
    out: &mut W,
    app: &App,
    notices: &mut UnboundedReceiver<Notice>,
) -> Result<()> {
    for notice in drain(notices) {
        render::notice(out, &notice)?;
    }
    writeln!(out, "Now on: {} ({})", app.route().title(), app.route().path())?;
    Ok(())
}

fn handle_config<W: Write>(out: &mut W, path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(path)?;
            if json {
                render::json(out, &config)?;
            } else {
                render::config(out, &config)?;
            }
        }
        ConfigCommand::Path => {
            let path = path.unwrap_or_else(Config::default_config_path);
            writeln!(out, "{}", path.display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(path).unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            match Config::load_from(Some(path)) {
                Ok(_) => writeln!(out, "Configuration is valid.")?,
                Err(e) => writeln!(out, "Configuration error: {e}")?,
            }
        }
    }
    Ok(())
}
