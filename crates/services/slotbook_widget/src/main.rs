// File: services/slotbook_widget/src/main.rs
mod args;

use slotbook_common::logging::{self, log_result};
use slotbook_common::{ApiClient, CalendarApi};
use slotbook_config::load_config;
use slotbook_flow::{
    FlowController, FlowDeps, FlowSettings, HttpCalendarApi, LogHost, QueryParams,
    StaticCredentials, SystemClock,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::args::{parse_args, Args, USAGE};

fn print_view(flow: &FlowController) {
    match serde_json::to_string_pretty(&flow.view()) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to render view: {}", e),
    }
}

async fn book(flow: &mut FlowController, args: &Args, index: usize) -> bool {
    let Some(start) = flow
        .slots()
        .get(index - 1)
        .map(|slot| slot.start_utc.clone())
    else {
        error!("There is no slot number {} ({} listed)", index, flow.slots().len());
        return false;
    };

    flow.select_slot(&start);
    flow.next();
    flow.set_name(args.name.as_str());
    flow.set_email(args.email.as_str());
    flow.set_telegram(args.telegram.as_str());
    flow.set_agreed(args.agree);

    match flow.submit().await {
        Ok(outcome) => {
            info!("Submission finished: {:?}", outcome);
            true
        }
        Err(e) => {
            warn!("Submission failed: {}", e);
            false
        }
    }
}

/// Asks the host to close the widget. `false` when the host refused.
fn close(flow: &mut FlowController) -> bool {
    log_result(flow.close(), "Close requested", "Host did not accept close").is_ok()
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) if args.help => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_with_level(logging::parse_level(&config.log_level));

    let query = QueryParams::parse(&args.page_url);

    // Only real bookings need the API; mock mode runs without it.
    let api: Option<Arc<dyn CalendarApi>> = match ApiClient::from_config(&config.api) {
        Ok(client) => Some(Arc::new(HttpCalendarApi::new(client)) as Arc<dyn CalendarApi>),
        Err(e) if query.is_mock_forced() => {
            info!("Mock mode, booking API not used: {}", e);
            None
        }
        Err(e) => {
            error!("Cannot start the booking flow: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let deps = FlowDeps {
        api,
        credentials: Arc::new(StaticCredentials::from_config(&config)),
        host: Arc::new(LogHost),
        clock: Arc::new(SystemClock),
    };
    let mut flow = FlowController::new(query, FlowSettings::from_config(&config.widget), deps);

    flow.mount().await;
    print_view(&flow);

    if args.open_agreement {
        match flow.open_agreement() {
            Ok(true) => {}
            Ok(false) => warn!("No offer terms configured (widget.agreement_url)"),
            Err(e) => warn!("Could not open the offer terms: {}", e),
        }
    }

    let mut ok = true;
    if let Some(index) = args.select {
        ok = book(&mut flow, &args, index).await;
        print_view(&flow);
    }

    if args.close && !close(&mut flow) {
        ok = false;
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
