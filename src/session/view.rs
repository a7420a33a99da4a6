// src/session/view.rs

use crate::inventory::{
    open_buyer_editor, save_buyer, BuyerEditor, BuyerForm, Criteria, InventoryError, Project,
    ProjectChoice, TemplateStore, Variant,
};
use crate::inventory::buyer::find_unit;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Info,
    Danger,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Danger => "danger",
        }
    }
}

/// One-shot banner shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: Tone,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            tone: Tone::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            tone: Tone::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Notice {
            tone: Tone::Danger,
            message: message.into(),
        }
    }
}

/// Where the tree currently on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Empty,
    Live,
    Fallback,
}

/// Issued by `begin_fetch`; only the newest ticket may install a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub project_id: String,
    pub query: Vec<(String, String)>,
}

/// Result of one grid load, ready to install.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub projects: Vec<Project>,
    pub origin: Origin,
    pub notice: Notice,
}

/// Everything one viewer has open on one matrix screen.
#[derive(Debug)]
pub struct ViewSession {
    pub variant: Variant,
    pub project_id: Option<String>,
    pub projects: Vec<Project>,
    pub origin: Origin,
    pub criteria: Criteria,
    pub templates: TemplateStore,
    pub editor: Option<BuyerEditor>,
    pub choices: Option<Vec<ProjectChoice>>,
    notice: Option<Notice>,
    fetched_query: Vec<(String, String)>,
    generation: u64,
}

impl ViewSession {
    pub fn new(variant: Variant) -> Self {
        ViewSession {
            variant,
            project_id: None,
            projects: Vec::new(),
            origin: Origin::Empty,
            criteria: Criteria::default(),
            templates: TemplateStore::new(variant),
            editor: None,
            choices: None,
            notice: None,
            fetched_query: Vec::new(),
            generation: 0,
        }
    }

    /// A fetch is due when the project changes, the upstream query changes,
    /// or the viewer asked for a refresh.
    pub fn needs_load(&self, project_id: &str, query: &[(String, String)], refresh: bool) -> bool {
        refresh
            || self.project_id.as_deref() != Some(project_id)
            || self.fetched_query.as_slice() != query
    }

    pub fn begin_fetch(&mut self, project_id: &str, query: Vec<(String, String)>) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            project_id: project_id.to_string(),
            query,
        }
    }

    /// Installs `loaded` if `ticket` is still the newest fetch. The previous
    /// tree is discarded wholesale along with any open editor.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, loaded: Loaded) -> bool {
        if ticket.generation != self.generation {
            warn!(
                variant = %self.variant,
                project = %ticket.project_id,
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded grid fetch"
            );
            return false;
        }

        info!(
            variant = %self.variant,
            project = %ticket.project_id,
            origin = ?loaded.origin,
            projects = loaded.projects.len(),
            "grid installed"
        );

        self.project_id = Some(ticket.project_id);
        self.fetched_query = ticket.query;
        self.projects = loaded.projects;
        self.origin = loaded.origin;
        self.editor = None;
        self.notice = Some(loaded.notice);
        true
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Hands the pending notice to the renderer and clears it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn open_editor(&mut self, unit_id: &str) -> Result<&mut BuyerEditor, InventoryError> {
        let needs_open = self.editor.as_ref().map_or(true, |e| e.unit_id != unit_id);
        if needs_open {
            let unit = find_unit(&self.projects, unit_id)
                .ok_or_else(|| InventoryError::UnitNotFound(unit_id.to_string()))?;
            self.editor = Some(open_buyer_editor(unit, self.variant));
        }
        self.editor
            .as_mut()
            .ok_or_else(|| InventoryError::UnitNotFound(unit_id.to_string()))
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Saves onto the in-memory tree and closes the editor for that unit.
    pub fn save_buyer(&mut self, unit_id: &str, form: &BuyerForm) -> Result<String, InventoryError> {
        let label = save_buyer(&mut self.projects, unit_id, form)?.label.clone();
        if self.editor.as_ref().map_or(false, |e| e.unit_id == unit_id) {
            self.editor = None;
        }
        Ok(label)
    }
}
