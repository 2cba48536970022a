use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::llm::models::provider_handle::{Endpoint, LlmRequestHandler, ReqwestTransport, Transport};
use crate::llm::prompts;
use crate::llm::utils::ticket_extractor::{extract_tickets, Ticket};
use crate::storage::ProjectWorkspace;

/// What happened to one ticket during [`Planner::run`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketOutcome {
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub code_path: Option<PathBuf>,
    pub tests_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl TicketOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub project_folder: PathBuf,
    pub plan_path: PathBuf,
    pub tickets_path: PathBuf,
    pub tickets: Vec<TicketOutcome>,
}

impl PipelineReport {
    pub fn failed_tickets(&self) -> usize {
        self.tickets.iter().filter(|t| !t.succeeded()).count()
    }
}

/// The plan → tickets → code/tests stages against one endpoint.
pub struct Planner<T: Transport> {
    handler: LlmRequestHandler<T>,
    endpoint: Endpoint,
}

impl Planner<ReqwestTransport> {
    pub fn from_config(config: &AppConfig, endpoint_name: Option<&str>) -> Result<Self> {
        let endpoint = config.endpoint(endpoint_name)?;
        let handler = LlmRequestHandler::from_config(config)?;
        Ok(Self::new(handler, endpoint))
    }
}

impl<T: Transport> Planner<T> {
    pub fn new(handler: LlmRequestHandler<T>, endpoint: Endpoint) -> Self {
        Self { handler, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn handler(&self) -> &LlmRequestHandler<T> {
        &self.handler
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        self.handler
            .send_to(&self.endpoint, prompt)
            .with_context(|| format!("LLM request to {} failed", self.endpoint.api_url))
    }

    pub fn project_plan(&self, project_desc: &str) -> Result<String> {
        self.ask(&prompts::plan_prompt(project_desc))
    }

    pub fn tickets(&self, plan_text: &str) -> Result<Vec<Ticket>> {
        let prompt = format!("{}\n\n{}", prompts::JSON_ONLY_NOTE, prompts::tickets_prompt(plan_text));
        let raw = self.ask(&prompt)?;
        Ok(extract_tickets(&raw)?)
    }

    pub fn code_for_ticket(&self, ticket: &Ticket) -> Result<String> {
        let file_path = ticket.file_path().context("ticket has no file_path")?;
        self.ask(&prompts::ticket_code_prompt(ticket, file_path))
    }

    pub fn tests_for_ticket(&self, ticket: &Ticket) -> Result<String> {
        let file_path = ticket.file_path().context("ticket has no file_path")?;
        let title = ticket.title().context("ticket has no title")?;
        let module = Path::new(file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_path);
        let prompt = format!(
            "{}\n\n{}",
            prompts::test_file_note(module),
            prompts::ticket_tests_prompt(ticket, file_path, title)
        );
        self.ask(&prompt)
    }

    /// Asks for a full rewrite of an existing file according to a ticket.
    pub fn regenerate_file(
        &self,
        file_path: &str,
        existing_code: &str,
        ticket_description: &str,
    ) -> Result<String> {
        self.ask(&prompts::code_file_prompt(file_path, existing_code, ticket_description))
    }

    /// Runs every stage and writes the artifacts into `workspace`.
    ///
    /// Plan and ticket failures abort the run. A failing ticket is recorded in
    /// the report and the remaining tickets still run.
    pub fn run(
        &self,
        project_name: &str,
        project_desc: &str,
        workspace: &ProjectWorkspace,
    ) -> Result<PipelineReport> {
        let project_text = format!("{}\n{}", project_name, project_desc);

        let plan = self.project_plan(&project_text)?;
        let plan_path = workspace.save_plan(&plan)?;
        workspace.save_response(&project_text, &plan)?;
        log::info!("Saved plan for {} to {}", project_name, plan_path.display());

        let tickets = self.tickets(&plan)?;
        let tickets_path = workspace.save_tickets(&tickets)?;
        log::info!("Saved {} tickets to {}", tickets.len(), tickets_path.display());

        let outcomes = tickets
            .iter()
            .enumerate()
            .map(|(idx, ticket)| {
                let mut outcome = TicketOutcome {
                    title: ticket.title().map(str::to_string),
                    file_path: ticket.file_path().map(str::to_string),
                    ..Default::default()
                };
                if let Err(e) = self.build_ticket(ticket, workspace, &mut outcome) {
                    log::error!("Ticket #{} ({:?}) failed: {:#}", idx, outcome.title, e);
                    outcome.error = Some(format!("{:#}", e));
                }
                outcome
            })
            .collect();

        Ok(PipelineReport {
            project_folder: workspace.root().to_path_buf(),
            plan_path,
            tickets_path,
            tickets: outcomes,
        })
    }

    fn build_ticket(
        &self,
        ticket: &Ticket,
        workspace: &ProjectWorkspace,
        outcome: &mut TicketOutcome,
    ) -> Result<()> {
        let file_path = ticket.file_path().context("ticket has no file_path")?;

        let code = self.code_for_ticket(ticket)?;
        outcome.code_path = Some(workspace.save_code(file_path, &code)?);

        let tests = self.tests_for_ticket(ticket)?;
        outcome.tests_path = Some(workspace.save_tests(file_path, &tests)?);
        Ok(())
    }
}
