//! Subcommand handlers.

use mycoscope_common::{MycoscopeError, Result};
use mycoscope_config::MycoscopeConfig;
use mycoscope_research::{
    enhance_query, enhance_query_default, suggest_related_queries, ResearchClient, ResearchEvent,
    SessionState,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::cli::{Args, Command, FilesCommand};
use crate::settings;

pub async fn run(args: Args, config: MycoscopeConfig) -> Result<()> {
    let base_url = args.base_url.as_deref();
    match args.command {
        Command::Research {
            query,
            report_type,
            tone,
            sources,
            filters,
            chat,
        } => {
            let params =
                settings::research_params(&config, query, report_type, tone, sources, filters);
            let client = ResearchClient::new(settings::client_config(&config, base_url))?;
            research(client, params, chat).await
        }
        Command::Enhance { query, categories } => {
            let enhanced = if categories.is_empty() {
                enhance_query_default(&query)
            } else {
                enhance_query(&query, &categories)
            };
            println!("{enhanced}");
            Ok(())
        }
        Command::Suggest { query, category } => {
            for suggestion in suggest_related_queries(&query, category.as_deref()) {
                println!("{suggestion}");
            }
            Ok(())
        }
        Command::Files { action } => {
            let client = ResearchClient::new(settings::client_config(&config, base_url))?;
            files(&client, action).await
        }
        Command::Config => {
            let mut config = config;
            if let Some(url) = base_url {
                config.backend.base_url = url.to_string();
            }
            println!("{}", mycoscope_config::config_to_json(&config));
            Ok(())
        }
    }
}

async fn research(
    mut client: ResearchClient,
    params: mycoscope_research::ResearchParams,
    chat: Vec<String>,
) -> Result<()> {
    let mut events = client.subscribe();
    let mut state = client.watch_state();

    client.start_research(params).await?;
    for message in &chat {
        if !client.send_chat_message(message) {
            warn!(message = %message, "chat message dropped");
        }
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    println!("{}", render(&event));
                    if event == ResearchEvent::ResearchComplete {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            changed = state.changed() => {
                if changed.is_err() || *state.borrow() == SessionState::Closed {
                    // Flush anything published just before the close.
                    while let Ok(event) = events.try_recv() {
                        println!("{}", render(&event));
                    }
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    client.disconnect();
    Ok(())
}

async fn files(client: &ResearchClient, action: FilesCommand) -> Result<()> {
    let output = match action {
        FilesCommand::List => {
            let listing = client.get_uploaded_files().await?;
            serde_json::to_value(listing).map_err(|e| MycoscopeError::Other(e.to_string()))?
        }
        FilesCommand::Upload { path } => client.upload_file(&path).await?,
        FilesCommand::Delete { name } => client.delete_file(&name).await?,
    };
    let text =
        serde_json::to_string_pretty(&output).map_err(|e| MycoscopeError::Other(e.to_string()))?;
    println!("{text}");
    Ok(())
}

/// One line of terminal output per event.
fn render(event: &ResearchEvent) -> String {
    let tag = event.kind().as_str();
    match event {
        ResearchEvent::Logs { content, output } | ResearchEvent::Progress { content, output } => {
            match content {
                Some(content) => format!("[{tag}] {content}: {}", value_text(output)),
                None => format!("[{tag}] {}", value_text(output)),
            }
        }
        ResearchEvent::ReportComplete { output } => format!("[{tag}] {}", value_text(output)),
        ResearchEvent::ResearchComplete => format!("[{tag}]"),
        ResearchEvent::Error { message } => format!("[{tag}] {message}"),
        ResearchEvent::LanggraphUpdate { content } => format!("[{tag}] {content}"),
    }
}

/// Strings print bare, anything else as compact JSON.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_logs_with_and_without_content() {
        let with = ResearchEvent::Logs {
            content: Some("subqueries".into()),
            output: json!("Searching PubMed"),
        };
        assert_eq!(render(&with), "[logs] subqueries: Searching PubMed");

        let without = ResearchEvent::Progress {
            content: None,
            output: json!({"done": 1}),
        };
        assert_eq!(render(&without), r#"[progress] {"done":1}"#);
    }

    #[test]
    fn render_terminal_events() {
        assert_eq!(
            render(&ResearchEvent::ReportComplete {
                output: json!("outputs/report.pdf")
            }),
            "[report_complete] outputs/report.pdf"
        );
        assert_eq!(render(&ResearchEvent::ResearchComplete), "[research_complete]");
        assert_eq!(
            render(&ResearchEvent::Error {
                message: "connection lost".into()
            }),
            "[error] connection lost"
        );
    }
}
