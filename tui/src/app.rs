//! Application state and key handling for the TUI.
//!
//! Nothing in here touches the terminal, so every flow (sign-up, login,
//! manual entry, CSV upload, logout) can be driven from tests with synthetic
//! key events.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use qubitry_contracts::{
    error::QubitryError,
    patient::{CancerType, Patient, PatientForm},
    session::{Session, SignupForm},
};
use qubitry_core::{AppState, Workbench};
use qubitry_intake::csv_import::read_records_from_path;
use qubitry_oncology::{
    analysis::{analyze, PatientAnalysis},
    catalog::CANCER_DRUGS,
};

// ── Notices ───────────────────────────────────────────────────────────────────

/// The one-line status message under the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn from_error(e: &QubitryError) -> Self {
        if e.is_warning() {
            Notice::Warning(e.to_string())
        } else {
            Notice::Error(e.to_string())
        }
    }
}

// ── Login / sign-up ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
    Confirm,
}

#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub focus: AuthField,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: String::new(),
            confirm: String::new(),
            focus: AuthField::Username,
        }
    }
}

impl AuthForm {
    fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::SignUp => &[AuthField::Username, AuthField::Password, AuthField::Confirm],
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (at + 1) % fields.len()
        } else {
            (at + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn focused_text(&mut self) -> &mut String {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
            AuthField::Confirm => &mut self.confirm,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
        self.password.clear();
        self.confirm.clear();
        self.focus = AuthField::Username;
    }
}

// ── Manual entry ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Name,
    Age,
    Condition,
    Medications,
    Smoking,
    Alcohol,
    Obesity,
}

impl EntryField {
    pub const ALL: [EntryField; 7] = [
        EntryField::Name,
        EntryField::Age,
        EntryField::Condition,
        EntryField::Medications,
        EntryField::Smoking,
        EntryField::Alcohol,
        EntryField::Obesity,
    ];
}

const SLIDER_STEP: u8 = 5;
const MAX_AGE: u8 = 120;

#[derive(Debug)]
pub struct EntryForm {
    pub name: String,
    pub age: u8,
    /// Index into `CancerType::ALL`.
    pub condition: usize,
    /// One flag per `CANCER_DRUGS` entry.
    pub selected: [bool; CANCER_DRUGS.len()],
    pub med_cursor: usize,
    pub smoking: u8,
    pub alcohol: u8,
    pub obesity: u8,
    pub focus: EntryField,
}

impl Default for EntryForm {
    fn default() -> Self {
        let defaults = PatientForm::default();
        Self {
            name: defaults.name,
            age: defaults.age,
            condition: CancerType::ALL
                .iter()
                .position(|c| c.as_str() == defaults.condition)
                .unwrap_or(0),
            selected: [false; CANCER_DRUGS.len()],
            med_cursor: 0,
            smoking: defaults.smoking_pct,
            alcohol: defaults.alcohol_pct,
            obesity: defaults.obesity_pct,
            focus: EntryField::Name,
        }
    }
}

impl EntryForm {
    pub fn condition(&self) -> CancerType {
        CancerType::ALL[self.condition]
    }

    pub fn to_form(&self) -> PatientForm {
        PatientForm {
            name: self.name.clone(),
            age: self.age,
            condition: self.condition().as_str().to_string(),
            medications: CANCER_DRUGS
                .iter()
                .zip(self.selected)
                .filter(|(_, on)| *on)
                .map(|(drug, _)| drug.to_string())
                .collect(),
            smoking_pct: self.smoking,
            alcohol_pct: self.alcohol,
            obesity_pct: self.obesity,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let all = EntryField::ALL;
        let at = all.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (at + 1) % all.len()
        } else {
            (at + all.len() - 1) % all.len()
        };
        self.focus = all[next];
    }

    /// Left (`-1`) or Right (`+1`) on the focused field.
    fn adjust(&mut self, delta: i8) {
        let up = delta > 0;
        match self.focus {
            EntryField::Name => {}
            EntryField::Age => {
                self.age = if up {
                    self.age.saturating_add(1).min(MAX_AGE)
                } else {
                    self.age.saturating_sub(1)
                };
            }
            EntryField::Condition => {
                let n = CancerType::ALL.len();
                self.condition = if up {
                    (self.condition + 1) % n
                } else {
                    (self.condition + n - 1) % n
                };
            }
            EntryField::Medications => {
                let n = CANCER_DRUGS.len();
                self.med_cursor = if up {
                    (self.med_cursor + 1) % n
                } else {
                    (self.med_cursor + n - 1) % n
                };
            }
            EntryField::Smoking | EntryField::Alcohol | EntryField::Obesity => {
                let slider = match self.focus {
                    EntryField::Smoking => &mut self.smoking,
                    EntryField::Alcohol => &mut self.alcohol,
                    _ => &mut self.obesity,
                };
                *slider = if up {
                    slider.saturating_add(SLIDER_STEP).min(100)
                } else {
                    slider.saturating_sub(SLIDER_STEP)
                };
            }
        }
    }

    fn type_char(&mut self, c: char) {
        match self.focus {
            EntryField::Name => self.name.push(c),
            EntryField::Age => {
                if let Some(d) = c.to_digit(10) {
                    let typed = u32::from(self.age) * 10 + d;
                    self.age = u8::try_from(typed)
                        .ok()
                        .filter(|a| *a <= MAX_AGE)
                        .unwrap_or(d as u8);
                }
            }
            EntryField::Medications if c == ' ' => {
                self.selected[self.med_cursor] = !self.selected[self.med_cursor];
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            EntryField::Name => {
                self.name.pop();
            }
            EntryField::Age => self.age /= 10,
            _ => {}
        }
    }
}

// ── Tabs ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    ManualEntry,
    CsvUpload,
    Patients,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::ManualEntry, Tab::CsvUpload, Tab::Patients, Tab::Analytics];

    pub fn title(self) -> &'static str {
        match self {
            Tab::ManualEntry => "Manual Entry",
            Tab::CsvUpload => "CSV Upload",
            Tab::Patients => "Patients",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    workbench: Workbench,
    pub state: AppState,
    /// `None` while on the login screen.
    pub session: Option<Session>,
    pub auth: AuthForm,
    pub tab: Tab,
    pub entry: EntryForm,
    pub upload_path: String,
    /// Index of the highlighted patient among the session user's patients.
    pub selected: usize,
    /// Analysis of the highlighted patient. Cached so the genetic graph does
    /// not move on every redraw.
    pub analysis: Option<PatientAnalysis>,
    rng: StdRng,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(workbench: Workbench) -> Self {
        Self::with_rng(workbench, StdRng::from_entropy())
    }

    pub fn with_rng(workbench: Workbench, rng: StdRng) -> Self {
        Self {
            workbench,
            state: AppState::new(),
            session: None,
            auth: AuthForm::default(),
            tab: Tab::ManualEntry,
            entry: EntryForm::default(),
            upload_path: String::new(),
            selected: 0,
            analysis: None,
            rng,
            notice: None,
            should_quit: false,
        }
    }

    /// The logged-in user's patients, oldest first.
    pub fn patients(&self) -> Vec<&Patient> {
        match &self.session {
            Some(session) => self.workbench.patients_for(&self.state, session),
            None => Vec::new(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') if ctrl && self.session.is_some() => {
                self.log_out();
                return;
            }
            _ => {}
        }

        if ctrl {
            return;
        }

        if self.session.is_none() {
            self.on_auth_key(key);
            return;
        }

        match key.code {
            KeyCode::F(n @ 1..=4) => self.switch_tab(Tab::ALL[usize::from(n) - 1]),
            _ => match self.tab {
                Tab::ManualEntry => self.on_entry_key(key),
                Tab::CsvUpload => self.on_upload_key(key),
                Tab::Patients => self.on_patients_key(key),
                Tab::Analytics => {}
            },
        }
    }

    // ── Login screen ──────────────────────────────────────────────────────────

    fn on_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::F(2) => {
                self.auth.toggle_mode();
                self.notice = None;
            }
            KeyCode::Tab | KeyCode::Down => self.auth.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.auth.cycle_focus(false),
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => {
                self.auth.focused_text().pop();
            }
            KeyCode::Char(c) => self.auth.focused_text().push(c),
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        match self.auth.mode {
            AuthMode::SignUp => {
                let form = SignupForm {
                    username: self.auth.username.clone(),
                    password: self.auth.password.clone(),
                    confirm: self.auth.confirm.clone(),
                };
                match self.workbench.sign_up(&mut self.state, &form) {
                    Ok(()) => {
                        self.auth = AuthForm::default();
                        self.notice =
                            Some(Notice::Success("Signup successful! Please login.".to_string()));
                    }
                    Err(e) => self.notice = Some(Notice::from_error(&e)),
                }
            }
            AuthMode::Login => {
                match self
                    .workbench
                    .log_in(&self.state, &self.auth.username, &self.auth.password)
                {
                    Ok(session) => {
                        self.notice = Some(Notice::Info(format!("Welcome, {}!", session.username)));
                        self.session = Some(session);
                        self.auth = AuthForm::default();
                        self.tab = Tab::ManualEntry;
                    }
                    Err(e) => self.notice = Some(Notice::from_error(&e)),
                }
            }
        }
    }

    fn log_out(&mut self) {
        self.session = None;
        self.auth = AuthForm::default();
        self.entry = EntryForm::default();
        self.upload_path.clear();
        self.selected = 0;
        self.analysis = None;
        self.tab = Tab::ManualEntry;
        self.notice = Some(Notice::Info("Logged out".to_string()));
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Patients && self.analysis.is_none() {
            self.refresh_analysis();
        }
    }

    // ── Manual entry ──────────────────────────────────────────────────────────

    fn on_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.entry.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.entry.cycle_focus(false),
            KeyCode::Left => self.entry.adjust(-1),
            KeyCode::Right => self.entry.adjust(1),
            KeyCode::Backspace => self.entry.backspace(),
            KeyCode::Enter => self.submit_entry(),
            KeyCode::Char(c) => self.entry.type_char(c),
            _ => {}
        }
    }

    fn submit_entry(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let form = self.entry.to_form();

        match self.workbench.add_patient(&mut self.state, session, &form) {
            Ok(patient) => {
                self.notice = Some(Notice::Success(format!("Patient {} added!", patient.name)));
                self.entry = EntryForm::default();
                self.analysis = None;
            }
            Err(e) => self.notice = Some(Notice::from_error(&e)),
        }
    }

    // ── CSV upload ────────────────────────────────────────────────────────────

    fn on_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_upload(),
            KeyCode::Backspace => {
                self.upload_path.pop();
            }
            KeyCode::Char(c) => self.upload_path.push(c),
            _ => {}
        }
    }

    fn submit_upload(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let path = self.upload_path.trim();
        if path.is_empty() {
            self.notice = Some(Notice::Warning("enter the path of a CSV file".to_string()));
            return;
        }

        match read_records_from_path(Path::new(path)) {
            Ok(records) => {
                let added = self.workbench.import_records(&mut self.state, session, records);
                self.notice = Some(Notice::Success(format!("{added} patients added")));
                self.analysis = None;
            }
            Err(e) => self.notice = Some(Notice::from_error(&e)),
        }
    }

    // ── Patients ──────────────────────────────────────────────────────────────

    fn on_patients_key(&mut self, key: KeyEvent) {
        let count = self.patients().len();
        if count == 0 {
            return;
        }
        let before = self.selected;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(count - 1),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            // Re-run the analysis, which redraws the genetic graph.
            KeyCode::Char('r') => self.analysis = None,
            _ => {}
        }
        if self.selected != before || self.analysis.is_none() {
            self.refresh_analysis();
        }
    }

    fn refresh_analysis(&mut self) {
        let Some(session) = self.session.as_ref() else {
            self.analysis = None;
            return;
        };
        let count = self.workbench.patients_for(&self.state, session).len();
        if count > 0 && self.selected >= count {
            self.selected = count - 1;
        }

        self.analysis = match self.workbench.patient_for(&self.state, session, self.selected) {
            Ok(patient) => Some(analyze(patient, self.workbench.checker(), &mut self.rng)),
            Err(_) => None,
        };
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn app() -> App {
        App::with_rng(qubitry_oncology::workbench().unwrap(), StdRng::seed_from_u64(5))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Sign up and log in as `user`.
    fn enter_as(app: &mut App, user: &str) {
        press(app, KeyCode::F(2));
        type_str(app, user);
        press(app, KeyCode::Tab);
        type_str(app, "pw");
        press(app, KeyCode::Tab);
        type_str(app, "pw");
        press(app, KeyCode::Enter);
        assert_eq!(app.auth.mode, AuthMode::Login);

        type_str(app, user);
        press(app, KeyCode::Tab);
        type_str(app, "pw");
        press(app, KeyCode::Enter);
        assert!(app.session.is_some(), "login failed: {:?}", app.notice);
    }

    // ── Login screen ──────────────────────────────────────────────────────────

    #[test]
    fn test_signup_with_mismatched_passwords_warns() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        type_str(&mut app, "dr-lee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "a");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "b");
        press(&mut app, KeyCode::Enter);

        match &app.notice {
            Some(Notice::Warning(msg)) => assert!(msg.contains("do not match")),
            other => panic!("expected warning, got {:?}", other),
        }
        assert_eq!(app.auth.mode, AuthMode::SignUp);
    }

    #[test]
    fn test_wrong_password_is_an_error() {
        let mut app = app();
        enter_as(&mut app, "dr-lee");
        ctrl(&mut app, 'l');
        assert!(app.session.is_none());

        type_str(&mut app, "dr-lee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "nope");
        press(&mut app, KeyCode::Enter);

        assert!(app.session.is_none());
        assert!(matches!(app.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }

    // ── Manual entry ──────────────────────────────────────────────────────────

    #[test]
    fn test_manual_entry_adds_patient() {
        let mut app = app();
        enter_as(&mut app, "dr-lee");

        type_str(&mut app, "Jane");
        // Name → Age → Condition → Medications
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right); // Breast Cancer
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' ')); // Carboplatin
        press(&mut app, KeyCode::Enter);

        match &app.notice {
            Some(Notice::Success(msg)) => assert_eq!(msg, "Patient Jane added!"),
            other => panic!("expected success, got {:?}", other),
        }
        let patients = app.patients();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].condition, "Breast Cancer");
        assert_eq!(patients[0].medications, vec![CANCER_DRUGS[0]]);
        assert_eq!(app.entry.name, "", "form resets after a successful add");
    }

    #[test]
    fn test_manual_entry_without_medication_warns() {
        let mut app = app();
        enter_as(&mut app, "dr-lee");
        type_str(&mut app, "Jane");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.notice, Some(Notice::Warning(_))));
        assert!(app.patients().is_empty());
        assert_eq!(app.entry.name, "Jane", "form is kept for correction");
    }

    #[test]
    fn test_entry_field_editing() {
        let mut form = EntryForm::default();
        assert_eq!((form.age, form.smoking, form.alcohol, form.obesity), (50, 10, 5, 0));

        form.focus = EntryField::Age;
        form.backspace();
        form.type_char('9');
        assert_eq!(form.age, 59);
        form.type_char('9');
        assert_eq!(form.age, 9, "an age over the limit restarts from the new digit");

        form.focus = EntryField::Obesity;
        form.adjust(-1);
        assert_eq!(form.obesity, 0);
        for _ in 0..30 {
            form.adjust(1);
        }
        assert_eq!(form.obesity, 100);

        form.focus = EntryField::Condition;
        form.adjust(-1);
        assert_eq!(form.condition(), CancerType::ALL[CancerType::ALL.len() - 1]);
    }

    // ── CSV upload and patients ───────────────────────────────────────────────

    #[test]
    fn test_csv_upload_then_browse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,age,condition,meds").unwrap();
        writeln!(file, "Ana,52,Lung Cancer,\"Carboplatin, Ifosfamide\"").unwrap();
        writeln!(file, "Ben,70,Melanoma,Trastuzumab").unwrap();

        let mut app = app();
        enter_as(&mut app, "dr-lee");
        press(&mut app, KeyCode::F(2));
        type_str(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);

        match &app.notice {
            Some(Notice::Success(msg)) => assert_eq!(msg, "2 patients added"),
            other => panic!("expected success, got {:?}", other),
        }

        press(&mut app, KeyCode::F(3));
        let analysis = app.analysis.as_ref().unwrap();
        assert_eq!(analysis.patient_name, "Ana");
        assert!(analysis.has_alerts());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        assert_eq!(app.analysis.as_ref().unwrap().patient_name, "Ben");

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1, "selection stops at the last patient");
    }

    #[test]
    fn test_bad_csv_path_reports_error() {
        let mut app = app();
        enter_as(&mut app, "dr-lee");
        press(&mut app, KeyCode::F(2));
        type_str(&mut app, "/definitely/not/here.csv");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn test_logout_hides_patients() {
        let mut app = app();
        enter_as(&mut app, "dr-lee");
        type_str(&mut app, "Jane");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.patients().len(), 1);

        ctrl(&mut app, 'l');
        assert!(app.session.is_none());
        assert!(app.patients().is_empty());

        enter_as(&mut app, "dr-kim");
        assert!(app.patients().is_empty());
    }
}
