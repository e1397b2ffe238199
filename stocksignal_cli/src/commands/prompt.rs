//! Interactive form: one symbol per line, results rendered as they arrive.
//!
//! Submissions never block input. Each one runs in its own task, and every
//! state change goes through [`reduce`], which drops responses that are no
//! longer the latest submission.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use stocksignal_lib::validation::validate_symbol;
use stocksignal_lib::{
    analyze, reduce, AnalysisError, AnalysisResult, Event, FormState, QuoteFetcher, RequestId,
    RequestSequence,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::{Id, JoinError, JoinSet};

use crate::output::{write_view, OutputFormat};

type Outcome = Result<AnalysisResult, AnalysisError>;

#[derive(Args)]
pub struct PromptArgs {
    /// Do not print the greeting line
    #[arg(long)]
    pub quiet: bool,
}

pub async fn run(args: &PromptArgs, fetcher: QuoteFetcher, format: &OutputFormat) -> Result<()> {
    if !args.quiet {
        eprintln!("Enter a ticker symbol (AAPL, MSFT, GOOGL...). Type 'quit' to exit.");
    }
    let input = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    run_session(input, &mut stdout.lock(), Arc::new(fetcher), format).await
}

/// Drives the form until `quit` (abandoning in-flight requests) or end of
/// input (after in-flight requests complete).
pub async fn run_session<R, W>(
    input: R,
    out: &mut W,
    fetcher: Arc<QuoteFetcher>,
    format: &OutputFormat,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let seq = RequestSequence::new();
    let mut state = FormState::new();
    let mut tasks: JoinSet<Outcome> = JoinSet::new();
    let mut pending: HashMap<Id, RequestId> = HashMap::new();
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        let event = tokio::select! {
            biased;
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) if line.trim().eq_ignore_ascii_case("quit") => {
                    if state.is_loading() {
                        tracing::info!("abandoning {} pending request(s)", tasks.len());
                    }
                    tasks.abort_all();
                    break;
                }
                Ok(Some(line)) => submit(&line, &seq, &fetcher, &mut tasks, &mut pending),
                Ok(None) => {
                    input_open = false;
                    continue;
                }
                // the reader has already consumed the offending line
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!("unreadable input line: {}", e);
                    Event::Rejected {
                        request: seq.next_id(),
                        error: AnalysisError::EmptyInput,
                    }
                }
                Err(e) => return Err(e.into()),
            },
            joined = tasks.join_next_with_id(), if !tasks.is_empty() => {
                match joined.and_then(|joined| finished(joined, &mut pending)) {
                    Some(event) => event,
                    None => continue,
                }
            },
            else => break,
        };

        let next = reduce(&state, event);
        if next != state {
            write_view(out, &next.view, format)?;
            out.flush()?;
        }
        state = next;
    }

    Ok(())
}

fn submit(
    line: &str,
    seq: &RequestSequence,
    fetcher: &Arc<QuoteFetcher>,
    tasks: &mut JoinSet<Outcome>,
    pending: &mut HashMap<Id, RequestId>,
) -> Event {
    let request = seq.next_id();
    match validate_symbol(line) {
        Err(error) => Event::Rejected { request, error },
        Ok(symbol) => {
            let fetcher = Arc::clone(fetcher);
            let task_symbol = symbol.clone();
            let handle = tasks.spawn(async move { analyze(&fetcher, &task_symbol).await });
            pending.insert(handle.id(), request);
            Event::Submitted { request, symbol }
        }
    }
}

/// Turns a joined task into the completion of its request. A task that
/// panicked or was cancelled fails its request with a connection error.
fn finished(
    joined: Result<(Id, Outcome), JoinError>,
    pending: &mut HashMap<Id, RequestId>,
) -> Option<Event> {
    let (id, outcome) = match joined {
        Ok(done) => done,
        Err(e) => {
            tracing::error!("analysis task failed: {}", e);
            (e.id(), Err(AnalysisError::ConnectionError))
        }
    };
    let request = pending.remove(&id)?;
    Some(Event::Finished { request, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use stocksignal_lib::alphavantage_api::Client;
    use stocksignal_lib::View;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn daily_fixture() -> String {
        std::fs::read_to_string(format!(
            "{}/../alphavantage_api/tests/fixtures/daily_ibm.json",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap()
    }

    async fn session(server: &MockServer, input: &[u8], format: &OutputFormat) -> String {
        let fetcher = Arc::new(QuoteFetcher::new(Client::with_base_url(
            &server.uri(),
            "test-key",
        )));
        let mut out = Vec::new();
        run_session(input, &mut out, fetcher, format)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn renders_loading_then_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(daily_fixture()))
            .mount(&server)
            .await;

        let text = session(&server, b"ibm\n", &OutputFormat::Table).await;
        assert!(text.starts_with("Analyzing IBM...\n"));
        assert!(text.contains("$169.21"));
        assert!(text.contains("HOLD"));
        assert!(text.contains("61.3"));
    }

    #[tokio::test]
    async fn blank_line_shows_validation_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let text = session(&server, b"   \n", &OutputFormat::Table).await;
        assert_eq!(text, "Enter a valid symbol\n");
    }

    #[tokio::test]
    async fn blank_line_supersedes_in_flight_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(daily_fixture()))
            .mount(&server)
            .await;

        let text = session(&server, b"ibm\n\n", &OutputFormat::Table).await;
        assert_eq!(text, "Analyzing IBM...\nEnter a valid symbol\n");
    }

    #[tokio::test]
    async fn slow_earlier_response_never_overwrites_newer_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("symbol", "AAPL"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(daily_fixture())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("symbol", "MSFT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Error Message": "Invalid API call."
            })))
            .mount(&server)
            .await;

        let text = session(&server, b"aapl\nmsft\n", &OutputFormat::Table).await;
        assert_eq!(
            text,
            "Analyzing AAPL...\nAnalyzing MSFT...\nSymbol \"MSFT\" not found\n"
        );
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let text = session(&server, b"QUIT\nibm\n", &OutputFormat::Table).await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn json_lines_per_state_change() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Note": "Thank you for using Alpha Vantage!"
            })))
            .mount(&server)
            .await;

        let text = session(&server, b"ibm\n", &OutputFormat::Json).await;
        let states: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0]["state"], "loading");
        assert_eq!(states[0]["symbol"], "IBM");
        assert_eq!(states[1]["state"], "failure");
        assert_eq!(states[1]["error"]["kind"], "rate_limited");
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_rejected_and_session_continues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(daily_fixture()))
            .mount(&server)
            .await;

        let text = session(&server, b"ibm\n\xff\xfe\nmsft\n", &OutputFormat::Table).await;
        assert!(text.starts_with(
            "Analyzing IBM...\nEnter a valid symbol\nAnalyzing MSFT...\n"
        ));
        assert!(text.contains("MSFT"));
        assert!(text.contains("$169.21"));
        assert!(!text.contains("| IBM"));
    }

    #[tokio::test]
    async fn cancelled_task_fails_its_request() {
        let seq = RequestSequence::new();
        let request = seq.next_id();
        let mut tasks: JoinSet<Outcome> = JoinSet::new();
        let handle = tasks.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(AnalysisError::NoData)
        });
        let mut pending = HashMap::from([(handle.id(), request)]);
        handle.abort();

        let joined = tasks.join_next_with_id().await.unwrap();
        assert!(joined.is_err());
        let event = finished(joined, &mut pending).unwrap();
        assert_eq!(
            event,
            Event::Finished {
                request,
                outcome: Err(AnalysisError::ConnectionError),
            }
        );
        assert!(pending.is_empty());

        let loading = reduce(
            &FormState::new(),
            Event::Submitted {
                request,
                symbol: "IBM".to_string(),
            },
        );
        let state = reduce(&loading, event);
        assert_eq!(state.view, View::Failure(AnalysisError::ConnectionError));
    }
}
