//! Flattened project/container rows and the selection over them

use crate::widgets::SelectableList;
use dockhand_core::{Container, Project, Target};
use ratatui::widgets::ListState;
use std::time::Duration;

/// One display row, pointing back into the project list it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEntry {
    Project {
        project: usize,
        text: String,
    },
    Container {
        project: usize,
        container: usize,
        text: String,
    },
}

impl ViewEntry {
    pub fn text(&self) -> &str {
        match self {
            Self::Project { text, .. } | Self::Container { text, .. } => text,
        }
    }
}

/// The entity under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    Project(&'a Project),
    Container(&'a Container),
}

impl Selection<'_> {
    /// Owned command target for the dispatcher
    pub fn to_target(&self) -> Target {
        match self {
            Self::Project(p) => Target::Project((*p).clone()),
            Self::Container(c) => Target::Container((*c).clone()),
        }
    }
}

/// Status shown when nothing is selected
pub fn ready_status(refresh_interval: Duration) -> String {
    format!("Ready (auto-refresh: {}s)", refresh_interval.as_secs())
}

pub fn project_line(project: &Project) -> String {
    format!(
        "--> {} ({}/{} running)",
        project.name.to_uppercase(),
        project.running_count(),
        project.total_count()
    )
}

pub fn container_line(container: &Container) -> String {
    format!(
        "    {} {} [{}]",
        container.state.icon(),
        container.name,
        container.state
    )
}

/// Owns the current projects, their flattened rows and the selection.
///
/// Only the UI loop mutates it. Selection is positional: a rebuild keeps the
/// row index when it still fits, clamps to the last row otherwise, and clears
/// it when there are no rows.
#[derive(Debug, Clone)]
pub struct ViewModel {
    projects: Vec<Project>,
    rows: SelectableList<ViewEntry>,
    idle_status: String,
}

impl ViewModel {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            projects: Vec::new(),
            rows: SelectableList::new(),
            idle_status: ready_status(refresh_interval),
        }
    }

    /// Replace the projects and regenerate every row
    pub fn rebuild(&mut self, projects: Vec<Project>) {
        let mut rows = Vec::with_capacity(
            projects.len() + projects.iter().map(Project::total_count).sum::<usize>(),
        );
        for (p, project) in projects.iter().enumerate() {
            rows.push(ViewEntry::Project {
                project: p,
                text: project_line(project),
            });
            for (c, container) in project.containers.iter().enumerate() {
                rows.push(ViewEntry::Container {
                    project: p,
                    container: c,
                    text: container_line(container),
                });
            }
        }

        self.projects = projects;
        self.rows.set_items(rows);
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn entries(&self) -> &[ViewEntry] {
        self.rows.items()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.rows.iter().map(ViewEntry::text).collect()
    }

    pub fn total_containers(&self) -> usize {
        self.projects.iter().map(Project::total_count).sum()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.rows.selected_index()
    }

    pub fn current_selection(&self) -> Option<Selection<'_>> {
        let entry = self.rows.selected_item()?;
        self.resolve(entry)
    }

    /// Entity behind a row
    pub fn resolve(&self, entry: &ViewEntry) -> Option<Selection<'_>> {
        match *entry {
            ViewEntry::Project { project, .. } => {
                self.projects.get(project).map(Selection::Project)
            }
            ViewEntry::Container {
                project, container, ..
            } => self
                .projects
                .get(project)
                .and_then(|p| p.containers.get(container))
                .map(Selection::Container),
        }
    }

    /// One-line description of the selected row
    pub fn describe_selection(&self) -> String {
        match self.current_selection() {
            Some(Selection::Container(c)) => format!("Container: {} [{}]", c.name, c.state),
            Some(Selection::Project(p)) => format!(
                "Project: {} [{}/{} running]",
                p.name,
                p.running_count(),
                p.total_count()
            ),
            None => self.idle_status.clone(),
        }
    }

    pub fn select_next(&mut self) {
        self.rows.select_next();
    }

    pub fn select_prev(&mut self) {
        self.rows.select_prev();
    }

    pub fn select_first(&mut self) {
        self.rows.select_first();
    }

    pub fn select_last(&mut self) {
        self.rows.select_last();
    }

    /// Put the cursor back on a previously captured row if it still exists
    pub fn restore_selection(&mut self, index: Option<usize>) {
        if let Some(index) = index.filter(|&i| i < self.rows.len()) {
            self.rows.select(index);
        }
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        self.rows.list_state_mut()
    }
}
