use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event;
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use ratatui::style::Color;

use hv_base::panels::PanelCache;
use hv_mod_compile::{CompileClient, ExecuteOutcome, language_for_path};
use hv_mod_contents::{ContentsClient, DirectoryEntry, RepoInfo, RepoSummary};
use hv_mod_groq::{GroqClient, prompts};
use hv_mod_search::{SearchClient, SearchKind, SearchResult, digest_prompt};
use hv_mod_tree::{DisplayRow, RepoKey, SessionTreeState, render};

use crate::editor::{EditorState, main_code_block};
use crate::events::{Action, handle_event};
use crate::highlight::highlight_content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    RepoSearch,
    Tree,
    File,
    Assistant,
    Resources,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Repository,
    Code,
}

/// One assistant question/answer pair, timestamped.
#[derive(Debug)]
pub struct HistoryEntry {
    pub query: String,
    pub response: String,
    pub timestamp: String,
}

/// One resource search: the query, the LLM digest (when available) and the
/// raw relayed hits.
#[derive(Debug)]
pub struct SearchRecord {
    pub query: String,
    pub digest: Option<String>,
    pub results: Vec<SearchResult>,
    pub timestamp: String,
}

/// The file currently open in the viewer.
#[derive(Debug)]
pub struct OpenFile {
    pub path: String,
    pub name: String,
    pub content: String,
}

pub struct App {
    contents: ContentsClient,
    groq: GroqClient,
    search: SearchClient,
    compile: CompileClient,

    pub page: Page,
    pub status: Option<StatusLine>,
    pub should_quit: bool,
    pub dirty: bool,

    // Repo search page
    pub username_input: String,
    pub repos: Vec<RepoSummary>,
    pub repo_selected: usize,
    repos_for: Option<String>,

    // Active repository
    pub repo: Option<RepoKey>,
    pub repo_info: Option<RepoInfo>,

    // Tree page
    pub tree: SessionTreeState,
    pub root_children: Vec<DirectoryEntry>,
    pub rows: Vec<DisplayRow>,
    pub tree_selected: usize,

    // File page
    pub file: Option<OpenFile>,
    pub file_scroll: u16,
    file_cache: PanelCache,
    pub file_highlight: Vec<Vec<(Color, String)>>,

    // Assistant page
    pub assistant_input: String,
    pub assistant_mode: QueryMode,
    pub assistant_history: Vec<HistoryEntry>,
    pub assistant_scroll: u16,

    // Resources page
    pub resources_input: String,
    pub search_kind: SearchKind,
    pub search_history: Vec<SearchRecord>,
    pub resources_scroll: u16,

    // Editor page
    pub editor: Option<EditorState>,
    edited_files: HashMap<String, String>,
    pub run_output: Option<ExecuteOutcome>,
}

impl App {
    pub fn new() -> Self {
        Self {
            contents: ContentsClient::new(),
            groq: GroqClient::new(),
            search: SearchClient::new(),
            compile: CompileClient::new(),
            page: Page::RepoSearch,
            status: None,
            should_quit: false,
            dirty: true,
            username_input: String::new(),
            repos: Vec::new(),
            repo_selected: 0,
            repos_for: None,
            repo: None,
            repo_info: None,
            tree: SessionTreeState::new(),
            root_children: Vec::new(),
            rows: Vec::new(),
            tree_selected: 0,
            file: None,
            file_scroll: 0,
            file_cache: PanelCache::new(),
            file_highlight: Vec::new(),
            assistant_input: String::new(),
            assistant_mode: QueryMode::Repository,
            assistant_history: Vec::new(),
            assistant_scroll: 0,
            resources_input: String::new(),
            search_kind: SearchKind::Tutorials,
            search_history: Vec::new(),
            resources_scroll: 0,
            editor: None,
            edited_files: HashMap::new(),
            run_output: None,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            if self.dirty {
                self.prepare_frame();
                terminal.draw(|frame| crate::ui::draw(frame, self))?;
                self.dirty = false;
            }
            if event::poll(Duration::from_millis(250))? {
                let ev = event::read()?;
                if let Some(action) = handle_event(&ev, self) {
                    self.apply_action(action);
                }
            }
        }
        Ok(())
    }

    /// Regenerate expensive derived render data before drawing.
    fn prepare_frame(&mut self) {
        if let Some(file) = &self.file
            && self.file_cache.update_if_changed(&file.content)
        {
            self.file_highlight = highlight_content(&file.name, &file.content);
        }
    }

    pub fn has_repo(&self) -> bool {
        self.repo.is_some()
    }

    pub fn apply_action(&mut self, action: Action) {
        self.dirty = true;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => self.go_back(),
            Action::GotoTree => self.page = Page::Tree,
            Action::GotoAssistant => self.page = Page::Assistant,
            Action::GotoResources => {
                if self.resources_input.is_empty() {
                    self.reseed_resources_input();
                }
                self.page = Page::Resources;
            }
            Action::OpenEditor => self.open_editor(),
            Action::InputChar(c) => self.input_mut().push(c),
            Action::InputBackspace => {
                self.input_mut().pop();
            }
            Action::Submit => self.submit(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::MovePageUp => self.move_selection(-10),
            Action::MovePageDown => self.move_selection(10),
            Action::ScrollUp(n) => {
                let scroll = self.scroll_mut();
                *scroll = scroll.saturating_sub(n);
            }
            Action::ScrollDown(n) => {
                let scroll = self.scroll_mut();
                *scroll = scroll.saturating_add(n);
            }
            Action::Activate => self.tree_activate(),
            Action::CycleMode => self.cycle_mode(),
            Action::ClearHistory => self.clear_history(),
            Action::ApplyCode => self.apply_assistant_code(),
            Action::EditorInsert(c) => self.with_editor(|ed| ed.insert_char(c)),
            Action::EditorNewline => self.with_editor(|ed| ed.newline()),
            Action::EditorBackspace => self.with_editor(|ed| ed.backspace()),
            Action::EditorLeft => self.with_editor(|ed| ed.move_left()),
            Action::EditorRight => self.with_editor(|ed| ed.move_right()),
            Action::EditorUp => self.with_editor(|ed| ed.move_up()),
            Action::EditorDown => self.with_editor(|ed| ed.move_down()),
            Action::EditorSave => self.editor_save(),
            Action::EditorRun => self.editor_run(),
            Action::EditorDiscard => self.editor_discard(),
        }
    }

    fn go_back(&mut self) {
        self.status = None;
        self.page = match self.page {
            Page::RepoSearch => Page::RepoSearch,
            Page::Tree => Page::RepoSearch,
            Page::File => Page::Tree,
            Page::Editor => {
                if self.file.is_some() {
                    Page::File
                } else {
                    Page::Tree
                }
            }
            Page::Assistant | Page::Resources => Page::Tree,
        };
    }

    fn input_mut(&mut self) -> &mut String {
        match self.page {
            Page::Assistant => &mut self.assistant_input,
            Page::Resources => &mut self.resources_input,
            _ => &mut self.username_input,
        }
    }

    fn scroll_mut(&mut self) -> &mut u16 {
        match self.page {
            Page::Assistant => &mut self.assistant_scroll,
            Page::Resources => &mut self.resources_scroll,
            _ => &mut self.file_scroll,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.page {
            Page::RepoSearch => (&mut self.repo_selected, self.repos.len()),
            Page::Tree => (&mut self.tree_selected, self.rows.len()),
            _ => return,
        };
        if len == 0 {
            return;
        }
        let max = len - 1;
        let next = selected.saturating_add_signed(delta).min(max);
        *selected = next;
    }

    fn submit(&mut self) {
        self.status = None;
        match self.page {
            Page::RepoSearch => self.submit_repo_search(),
            Page::Assistant => self.submit_assistant(),
            Page::Resources => self.submit_resources(),
            _ => {}
        }
    }

    fn cycle_mode(&mut self) {
        match self.page {
            Page::Assistant => {
                self.assistant_mode = match self.assistant_mode {
                    QueryMode::Repository => QueryMode::Code,
                    QueryMode::Code => QueryMode::Repository,
                };
            }
            Page::Resources => {
                self.search_kind = self.search_kind.next();
                self.reseed_resources_input();
            }
            _ => {}
        }
    }

    fn clear_history(&mut self) {
        match self.page {
            Page::Assistant => {
                self.assistant_history.clear();
                self.assistant_scroll = 0;
            }
            Page::Resources => {
                self.search_history.clear();
                self.resources_scroll = 0;
            }
            _ => {}
        }
    }

    /// Prefill the resources query from the active repo, like the source app
    /// seeds its search box from "{repo} {language}".
    fn reseed_resources_input(&mut self) {
        let repo = self.repo.as_ref().map(|k| k.repo.as_str()).unwrap_or("");
        let language = self.repo_info.as_ref().and_then(|i| i.language.as_deref()).unwrap_or("");
        self.resources_input = self.search_kind.seed_query(repo, language);
    }

    // ─── Repo search ───

    fn submit_repo_search(&mut self) {
        let username = self.username_input.trim().to_string();
        if username.is_empty() {
            self.warn("Enter a GitHub username first.");
            return;
        }
        // Second Enter on an unchanged username opens the selected repo
        if self.repos_for.as_deref() == Some(username.as_str()) && !self.repos.is_empty() {
            let repo_name = self.repos[self.repo_selected.min(self.repos.len() - 1)].name.clone();
            self.open_repo(&username, &repo_name);
            return;
        }
        match self.contents.list_repositories(&username) {
            Ok(repos) => {
                if repos.is_empty() {
                    self.warn(&format!("No public repositories found for {}.", username));
                }
                self.repos = repos;
                self.repo_selected = 0;
                self.repos_for = Some(username);
            }
            Err(e) => self.error(&format!("Error fetching repositories: {}", e)),
        }
    }

    fn open_repo(&mut self, owner: &str, repo: &str) {
        let key = RepoKey::new(owner, repo);
        self.tree.switch_repo(&key);
        self.repo_info = match self.contents.repo_info(owner, repo) {
            Ok(info) => Some(info),
            Err(e) => {
                self.warn(&format!("Could not fetch repository information: {}", e));
                None
            }
        };
        self.root_children = match self.contents.list_children(owner, repo, "") {
            Ok(children) => {
                if children.is_empty() {
                    self.warn("No files found in this repository or access denied.");
                }
                children
            }
            Err(e) => {
                self.error(&format!("Error fetching repository structure: {}", e));
                Vec::new()
            }
        };
        self.repo = Some(key);
        self.tree_selected = 0;
        self.file = None;
        self.file_cache.invalidate();
        self.editor = None;
        self.edited_files.clear();
        self.run_output = None;
        self.resources_input.clear();
        self.rebuild_rows();
        self.page = Page::Tree;
    }

    // ─── Tree ───

    fn rebuild_rows(&mut self) {
        let Some(key) = self.repo.clone() else {
            self.rows.clear();
            return;
        };
        let nodes = self.tree.reveal(&self.contents, &key, &self.root_children);
        self.rows = render(&nodes);
        if self.tree_selected >= self.rows.len() {
            self.tree_selected = self.rows.len().saturating_sub(1);
        }
    }

    fn tree_activate(&mut self) {
        let Some(row) = self.rows.get(self.tree_selected).cloned() else {
            return;
        };
        let Some(key) = self.repo.clone() else {
            return;
        };
        self.status = None;
        if row.kind.is_dir() {
            if let Err(e) = self.tree.toggle(&self.contents, &key, &row.path, true) {
                self.warn(&format!("Error listing {}: {} — shown as empty.", row.path, e));
            }
            self.rebuild_rows();
        } else {
            self.open_file(&key, &row.path);
        }
    }

    fn open_file(&mut self, key: &RepoKey, path: &str) {
        match self.contents.file_content(&key.owner, &key.repo, path) {
            Ok(content) => {
                self.file = Some(OpenFile { path: path.to_string(), name: content.name, content: content.text });
                self.file_scroll = 0;
                self.file_cache.invalidate();
                self.page = Page::File;
            }
            Err(e) => self.error(&format!("Error fetching file content: {}", e)),
        }
    }

    // ─── Assistant ───

    fn submit_assistant(&mut self) {
        let query = self.assistant_input.trim().to_string();
        if query.is_empty() {
            self.warn("Please enter a query before submitting.");
            return;
        }
        let result = match self.assistant_mode {
            QueryMode::Repository => {
                let Some(info) = &self.repo_info else {
                    self.warn("Repository information is not loaded.");
                    return;
                };
                let user = prompts::repository_query(info, &query);
                self.groq.complete(prompts::REPOSITORY_SYSTEM, &user).map(|response| (query.clone(), response))
            }
            QueryMode::Code => {
                let Some(file) = &self.file else {
                    self.warn("Open a file first to ask about its code.");
                    return;
                };
                // The session-local edit, if any, is what the user is looking at
                let content = self.edited_files.get(&file.path).unwrap_or(&file.content);
                let user = prompts::code_query(&file.name, content, &query);
                let label = format!("[File: {}] {}", file.path, query);
                self.groq.complete(prompts::CODE_SYSTEM, &user).map(|response| (label, response))
            }
        };
        match result {
            Ok((label, response)) => {
                self.assistant_history.push(HistoryEntry { query: label, response, timestamp: timestamp() });
                self.assistant_input.clear();
                self.assistant_scroll = 0;
            }
            Err(e) => self.error(&format!("Error: {}", e)),
        }
    }

    /// Apply the largest code block of the latest answer to the editor.
    fn apply_assistant_code(&mut self) {
        let Some(entry) = self.assistant_history.last() else {
            return;
        };
        let Some(code) = main_code_block(&entry.response) else {
            self.warn("The latest response has no code block to apply.");
            return;
        };
        if self.editor.is_none() {
            self.open_editor();
        }
        let Some(editor) = &mut self.editor else {
            return;
        };
        editor.set_text(&code);
        self.edited_files.insert(editor.path.clone(), code);
        self.info("Applied AI-generated code to the editor.");
        self.page = Page::Editor;
    }

    // ─── Resources ───

    fn submit_resources(&mut self) {
        let query = self.resources_input.trim().to_string();
        if query.is_empty() {
            self.warn("Please enter a search query before submitting.");
            return;
        }
        match self.search.search(&query) {
            Ok(results) => {
                let digest = if results.is_empty() {
                    None
                } else {
                    let (system, user) = digest_prompt(&query, &results);
                    match self.groq.complete(&system, &user) {
                        Ok(digest) => Some(digest),
                        Err(e) => {
                            self.warn(&format!("Digest unavailable ({}), showing raw results.", e));
                            None
                        }
                    }
                };
                self.search_history.push(SearchRecord { query, digest, results, timestamp: timestamp() });
                self.resources_scroll = 0;
            }
            Err(e) => self.error(&format!("Error: {}", e)),
        }
    }

    // ─── Editor ───

    fn open_editor(&mut self) {
        let Some(file) = &self.file else {
            self.warn("Open a file first.");
            return;
        };
        if self.editor.as_ref().map(|ed| ed.path != file.path).unwrap_or(true) {
            let content = self.edited_files.get(&file.path).cloned().unwrap_or_else(|| file.content.clone());
            self.editor = Some(EditorState::new(file.path.clone(), file.name.clone(), &content));
            self.run_output = None;
        }
        self.page = Page::Editor;
    }

    fn with_editor(&mut self, f: impl FnOnce(&mut EditorState)) {
        if let Some(editor) = &mut self.editor {
            f(editor);
        }
    }

    fn editor_save(&mut self) {
        let Some(editor) = &mut self.editor else {
            return;
        };
        self.edited_files.insert(editor.path.clone(), editor.text());
        editor.modified = false;
        let path = editor.path.clone();
        self.info(&format!("Changes to {} saved locally.", path));
    }

    fn editor_run(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let (language, version_index) = language_for_path(&editor.path);
        match self.compile.execute(&editor.text(), language, version_index) {
            Ok(outcome) => {
                self.run_output = Some(outcome);
                self.info(&format!("Executed as {}.", language));
            }
            Err(e) => self.error(&format!("Error executing code: {}", e)),
        }
    }

    /// Drop local edits and refetch the file from GitHub.
    fn editor_discard(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let Some(key) = self.repo.clone() else {
            return;
        };
        let path = editor.path.clone();
        match self.contents.file_content(&key.owner, &key.repo, &path) {
            Ok(content) => {
                self.edited_files.insert(path.clone(), content.text.clone());
                if let Some(file) = &mut self.file
                    && file.path == path
                {
                    file.content = content.text.clone();
                }
                self.editor = Some(EditorState::new(path, content.name, &content.text));
                self.info("Changes discarded. Reverted to original content.");
            }
            Err(e) => self.error(&format!("Error refetching file: {}", e)),
        }
    }

    // ─── Status helpers ───

    fn info(&mut self, text: &str) {
        self.status = Some(StatusLine { text: text.to_string(), level: StatusLevel::Info });
    }

    fn warn(&mut self, text: &str) {
        self.status = Some(StatusLine { text: text.to_string(), level: StatusLevel::Warning });
    }

    fn error(&mut self, text: &str) {
        self.status = Some(StatusLine { text: text.to_string(), level: StatusLevel::Error });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
