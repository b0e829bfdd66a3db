use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Notify, mpsc};

use orderform_core::SessionId;
use orderform_countdown::{CountdownEmitter, SystemClock};
use orderform_form::{ControlMap, OrderFormController, PresentationSink};
use orderform_terminal::{Input, TerminalConfig, TerminalSink, config, parse_line};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let log_format = config::log_format(|key| std::env::var(key).ok())
        .context("invalid log format")?;
    orderform_observability::init(log_format);

    let config = TerminalConfig::from_env().context("failed to load order form configuration")?;

    let session_id = SessionId::new();
    let catalog = Arc::new(config.catalog);
    let controls = ControlMap::storefront(&catalog);
    let sink = TerminalSink::new(std::io::stdout());
    let locale = config.form.locale;
    let mut form = OrderFormController::new(session_id, catalog, config.form, controls, sink)
        .context("failed to open order form")?;
    tracing::info!(session = %session_id, locale = locale.code(), "terminal session started");

    let shutdown = Arc::new(Notify::new());
    let (countdown_tx, mut countdown_rx) = mpsc::unbounded_channel::<String>();
    let emitter = CountdownEmitter::new(&config.countdown, SystemClock);
    let countdown = tokio::spawn(emitter.run(countdown_tx, shutdown.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice_check = tokio::time::interval(Duration::from_millis(250));
    notice_check.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => form.sink_mut().print_help(),
                    Ok(Some(Input::Time)) => form.sink_mut().print_countdown(),
                    Ok(Some(Input::Contact(field, text))) => {
                        form.sink_mut().set_contact_field(field, text);
                    }
                    Ok(Some(input)) => {
                        let Some(event) = input.to_event(form.state().selected()) else {
                            continue;
                        };
                        if let Err(err) = form.handle(event, Utc::now()) {
                            form.sink_mut().report_error(&err);
                        }
                    }
                    Err(err) => form.sink_mut().report_error(&err),
                }
            }
            Some(text) = countdown_rx.recv() => {
                form.sink_mut().set_countdown_text(&text);
            }
            _ = notice_check.tick() => {
                form.expire_notice(Utc::now());
            }
        }
    }

    shutdown.notify_one();
    countdown
        .await
        .context("countdown task panicked")?
        .context("countdown stopped unexpectedly")?;

    tracing::info!(session = %session_id, "order form closed");
    Ok(())
}
