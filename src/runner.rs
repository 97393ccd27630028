#![forbid(unsafe_code)]

//! The lint runner
//!
//! The Runner resolves which linters are active from a registry and a
//! configuration, applies every active linter to every file, and collects the
//! lints they report. A linter that fails (by returning an error or by
//! panicking) stops the run with a [`LinterError`] that names the file and
//! keeps the failure's original backtrace.
//!
//! The runner never prints or logs; reporting is left to its caller.

mod unwind;

use crate::engine::{Engine, SourceEngine};
use crate::error::{LinterError, RunnerError};
use crate::linters::{Lint, Linter, LinterDescriptor, LinterRegistry};
use crate::types::LinterName;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which linters a runner should use
///
/// When `included_linters` is set and non-empty, only those linters run.
/// `excluded_linters` is applied afterwards and always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    pub included_linters: Option<HashSet<LinterName>>,
    pub excluded_linters: Option<HashSet<LinterName>>,
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the run to the given linters
    pub fn include(mut self, names: impl IntoIterator<Item = LinterName>) -> Self {
        self.included_linters = Some(names.into_iter().collect());
        self
    }

    /// Never run the given linters
    pub fn exclude(mut self, names: impl IntoIterator<Item = LinterName>) -> Self {
        self.excluded_linters = Some(names.into_iter().collect());
        self
    }

    fn is_selected(&self, name: &LinterName) -> bool {
        let included = match &self.included_linters {
            Some(included) if !included.is_empty() => included.contains(name),
            _ => true,
        };
        let excluded = self
            .excluded_linters
            .as_ref()
            .is_some_and(|excluded| excluded.contains(name));

        included && !excluded
    }
}

/// Result of running all active linters against all files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Every lint reported, grouped by file in input order
    pub lints: Vec<Lint>,
    /// Number of files checked
    pub files_checked: usize,
    /// Number of linters applied to each file
    pub linters_run: usize,
}

impl RunReport {
    /// Whether no lint was reported
    pub fn is_clean(&self) -> bool {
        self.lints.is_empty()
    }
}

struct ActiveLinter {
    name: LinterName,
    linter: Box<dyn Linter>,
}

/// Applies the active linters to files
///
/// The active linter set is resolved once, at construction, from a snapshot
/// of the registry. It is never modified afterwards, so one runner can be
/// shared freely between threads.
pub struct Runner<E: Engine = SourceEngine> {
    linters: Vec<ActiveLinter>,
    engine: E,
}

impl Runner<SourceEngine> {
    /// Creates a runner that reads files from disk
    pub fn new(registry: &LinterRegistry, config: &RunnerConfig) -> Self {
        Self::with_engine(registry, config, SourceEngine::new())
    }
}

impl<E: Engine> Runner<E> {
    /// Creates a runner that builds documents with the given engine
    pub fn with_engine(registry: &LinterRegistry, config: &RunnerConfig, engine: E) -> Self {
        let linters = select_linters(registry.descriptors(), config)
            .into_iter()
            .map(|descriptor| ActiveLinter {
                name: descriptor.name().clone(),
                linter: descriptor.instantiate(),
            })
            .collect();

        Self { linters, engine }
    }

    /// Names of the active linters, in execution order
    pub fn linter_names(&self) -> Vec<&LinterName> {
        self.linters.iter().map(|active| &active.name).collect()
    }

    pub fn linter_count(&self) -> usize {
        self.linters.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run every active linter against every file, in order
    ///
    /// # Errors
    ///
    /// - `RunnerError::NoFilesSpecified` if `files` is empty
    /// - `RunnerError::NoLintersActive` if no linter is active
    /// - `RunnerError::Engine` if a file cannot be turned into a document
    /// - `RunnerError::Linter` for the first linter that fails; nothing after
    ///   it is analyzed
    pub fn run<P: AsRef<Path>>(&self, files: &[P]) -> Result<RunReport, RunnerError> {
        self.check_preconditions(files.len())?;

        let mut lints = Vec::new();
        for file in files {
            lints.extend(self.find_lints(file.as_ref())?);
        }

        Ok(self.report(lints, files.len()))
    }

    /// Like [`run`](Self::run), but analyzes files in parallel
    ///
    /// The outcome is the one a sequential run would produce: lints come back
    /// in input file order, and when several files fail, the error for the
    /// earliest of them is returned. Files after a failed one that have not
    /// started yet are skipped.
    pub fn run_parallel<P: AsRef<Path> + Sync>(
        &self,
        files: &[P],
    ) -> Result<RunReport, RunnerError> {
        self.check_preconditions(files.len())?;

        let first_failure = AtomicUsize::new(usize::MAX);
        let outcomes: Vec<Option<Result<Vec<Lint>, RunnerError>>> = files
            .par_iter()
            .enumerate()
            .map(|(index, file)| {
                if index > first_failure.load(Ordering::Acquire) {
                    return None;
                }
                let outcome = self.find_lints(file.as_ref());
                if outcome.is_err() {
                    first_failure.fetch_min(index, Ordering::AcqRel);
                }
                Some(outcome)
            })
            .collect();

        // A file is only skipped after an earlier one failed, so the first
        // error in input order is reached before any skipped slot.
        let mut lints = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            lints.extend(outcome?);
        }

        Ok(self.report(lints, files.len()))
    }

    fn check_preconditions(&self, file_count: usize) -> Result<(), RunnerError> {
        if file_count == 0 {
            return Err(RunnerError::NoFilesSpecified);
        }
        if self.linters.is_empty() {
            return Err(RunnerError::NoLintersActive);
        }
        Ok(())
    }

    /// Build one document and run every active linter on it
    fn find_lints(&self, file: &Path) -> Result<Vec<Lint>, RunnerError> {
        let document = self.engine.build(file)?;

        let mut lints = Vec::new();
        for active in &self.linters {
            let found = unwind::guard(|| active.linter.run(&document))
                .map_err(|failure| LinterError::new(active.name.clone(), file, failure))?;
            lints.extend(found);
        }

        Ok(lints)
    }

    fn report(&self, lints: Vec<Lint>, files_checked: usize) -> RunReport {
        RunReport {
            lints,
            files_checked,
            linters_run: self.linters.len(),
        }
    }
}

impl<E: Engine + fmt::Debug> fmt::Debug for Runner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("linters", &self.linter_names())
            .field("engine", &self.engine)
            .finish()
    }
}

/// Pick the descriptors a configuration enables, keeping registry order
fn select_linters<'a>(
    descriptors: &'a [LinterDescriptor],
    config: &RunnerConfig,
) -> Vec<&'a LinterDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| config.is_selected(descriptor.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Document;
    use crate::error::EngineError;
    use crate::linters::LinterFailure;
    use crate::types::{Location, Severity};

    fn name(s: &str) -> LinterName {
        LinterName::new(s).unwrap()
    }

    /// Engine that serves every path from memory
    #[derive(Debug, Default)]
    struct MemoryEngine {
        builds: AtomicUsize,
    }

    impl Engine for MemoryEngine {
        fn build(&self, path: &Path) -> Result<Document, EngineError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            if path.to_string_lossy().contains("missing") {
                return Err(EngineError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            Ok(Document::new(path, "a {}\n"))
        }
    }

    /// Reports one lint per document, tagged with its own name
    struct OneLint(LinterName);

    impl Linter for OneLint {
        fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
            Ok(vec![Lint::new(
                &self.0,
                document,
                Location::new(1, 1, 0),
                Severity::Warning,
                "one",
            )])
        }
    }

    /// Fails on documents whose path contains "bad"
    struct FailsOnBad;

    impl Linter for FailsOnBad {
        fn run(&self, document: &Document) -> Result<Vec<Lint>, LinterFailure> {
            if document.path().to_string_lossy().contains("bad") {
                let frames = vec![format!("fails_on_bad:{}", document.path().display())];
                return Err(LinterFailure::with_backtrace("bad file", frames));
            }
            Ok(vec![])
        }
    }

    fn registry(names: &[&str]) -> LinterRegistry {
        let mut registry = LinterRegistry::new();
        for n in names {
            registry
                .register(n, "reports one lint", |name| Box::new(OneLint(name.clone())))
                .unwrap();
        }
        registry
    }

    fn memory_runner(registry: &LinterRegistry) -> Runner<MemoryEngine> {
        Runner::with_engine(registry, &RunnerConfig::new(), MemoryEngine::default())
    }

    fn active_names<E: Engine>(runner: &Runner<E>) -> Vec<&str> {
        runner
            .linter_names()
            .into_iter()
            .map(LinterName::as_str)
            .collect()
    }

    #[test]
    fn test_select_all_when_unconfigured() {
        let runner = Runner::new(&registry(&["A", "B", "C"]), &RunnerConfig::new());
        assert_eq!(active_names(&runner), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_include_set_selects_all() {
        let config = RunnerConfig::new().include([]);
        let runner = Runner::new(&registry(&["A", "B"]), &config);
        assert_eq!(active_names(&runner), vec!["A", "B"]);
    }

    #[test]
    fn test_include_keeps_registry_order() {
        let config = RunnerConfig::new().include([name("C"), name("A")]);
        let runner = Runner::new(&registry(&["A", "B", "C"]), &config);
        assert_eq!(active_names(&runner), vec!["A", "C"]);
    }

    #[test]
    fn test_include_unknown_name_matches_nothing() {
        let config = RunnerConfig::new().include([name("Unknown")]);
        let runner = Runner::new(&registry(&["A"]), &config);
        assert_eq!(runner.linter_count(), 0);
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let config = RunnerConfig::new()
            .include([name("A"), name("B")])
            .exclude([name("B")]);
        let runner = Runner::new(&registry(&["A", "B"]), &config);
        assert_eq!(active_names(&runner), vec!["A"]);
    }

    #[test]
    fn test_registry_changes_after_construction_are_not_observed() {
        let mut registry = registry(&["A"]);
        let runner = Runner::new(&registry, &RunnerConfig::new());
        registry
            .register("B", "late", |name| Box::new(OneLint(name.clone())))
            .unwrap();
        assert_eq!(active_names(&runner), vec!["A"]);
    }

    #[test]
    fn test_run_collects_lints_per_file_in_order() {
        let runner = memory_runner(&registry(&["A", "B"]));

        let report = runner.run(&["one.scss", "two.scss"]).unwrap();
        let tagged: Vec<(String, &str)> = report
            .lints
            .iter()
            .map(|lint| (lint.file.display().to_string(), lint.linter.as_str()))
            .collect();

        assert_eq!(
            tagged,
            vec![
                ("one.scss".to_string(), "A"),
                ("one.scss".to_string(), "B"),
                ("two.scss".to_string(), "A"),
                ("two.scss".to_string(), "B"),
            ]
        );
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.linters_run, 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_run_without_files() {
        let runner = memory_runner(&registry(&[]));
        let files: [&str; 0] = [];
        assert!(matches!(
            runner.run(&files),
            Err(RunnerError::NoFilesSpecified)
        ));
        assert_eq!(runner.engine().builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_without_linters() {
        let runner = memory_runner(&registry(&[]));
        assert!(matches!(
            runner.run(&["a.scss"]),
            Err(RunnerError::NoLintersActive)
        ));
    }

    #[test]
    fn test_engine_error_is_not_wrapped() {
        let runner = memory_runner(&registry(&["A"]));
        match runner.run(&["missing.scss"]) {
            Err(RunnerError::Engine(EngineError::Read { path, .. })) => {
                assert_eq!(path, Path::new("missing.scss"));
            }
            other => panic!("Expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn test_linter_failure_stops_run() {
        let mut registry = LinterRegistry::new();
        registry
            .register("FailsOnBad", "fails", |_| Box::new(FailsOnBad))
            .unwrap();
        let runner = memory_runner(&registry);

        let err = runner
            .run(&["good.scss", "bad.scss", "later.scss"])
            .unwrap_err();
        match err {
            RunnerError::Linter(err) => {
                assert_eq!(err.file(), Path::new("bad.scss"));
                assert_eq!(err.linter().as_str(), "FailsOnBad");
                assert_eq!(err.backtrace(), ["fails_on_bad:bad.scss".to_string()]);
            }
            other => panic!("Expected linter error, got {:?}", other),
        }
        assert_eq!(runner.engine().builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_linter_becomes_linter_error() {
        struct Panics;

        impl Linter for Panics {
            fn run(&self, _document: &Document) -> Result<Vec<Lint>, LinterFailure> {
                panic!("index out of bounds");
            }
        }

        let mut registry = LinterRegistry::new();
        registry.register("Panics", "panics", |_| Box::new(Panics)).unwrap();
        let runner = memory_runner(&registry);

        match runner.run(&["a.scss"]) {
            Err(RunnerError::Linter(err)) => {
                assert!(err.to_string().contains("a.scss"));
                assert!(err.to_string().contains("index out of bounds"));
                assert!(!err.backtrace().is_empty());
            }
            other => panic!("Expected linter error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_parallel_matches_sequential() {
        let runner = memory_runner(&registry(&["A", "B"]));
        let files: Vec<String> = (0..32).map(|i| format!("file{}.scss", i)).collect();

        let sequential = runner.run(&files).unwrap();
        let parallel = runner.run_parallel(&files).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_run_parallel_reports_earliest_failure() {
        let mut registry = LinterRegistry::new();
        registry
            .register("FailsOnBad", "fails", |_| Box::new(FailsOnBad))
            .unwrap();
        let runner = memory_runner(&registry);

        let mut files: Vec<String> = (0..32).map(|i| format!("file{}.scss", i)).collect();
        files[5] = "bad5.scss".to_string();
        files[20] = "bad20.scss".to_string();

        for _ in 0..10 {
            match runner.run_parallel(&files) {
                Err(RunnerError::Linter(err)) => {
                    assert_eq!(err.file(), Path::new("bad5.scss"));
                }
                other => panic!("Expected linter error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_run_parallel_preconditions() {
        let runner = memory_runner(&registry(&[]));
        let files: [&str; 0] = [];
        assert!(matches!(
            runner.run_parallel(&files),
            Err(RunnerError::NoFilesSpecified)
        ));
        assert!(matches!(
            runner.run_parallel(&["a.scss"]),
            Err(RunnerError::NoLintersActive)
        ));
    }

    #[test]
    fn test_runner_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Runner>();
    }
}
