use std::fmt;

/// One failed case: the operands, the operator, and both sides of the
/// disagreement, rendered as binary patterns by the format under test.
#[derive(Clone, Debug)]
pub struct FailureRecord {
    pub op: &'static str,
    pub operands: Vec<String>,
    pub computed: String,
    pub reference: String,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FAIL {} {} -> {} expected {}",
            self.op,
            self.operands.join(" "),
            self.computed,
            self.reference
        )
    }
}

/// Aggregated result of a verification driver.
///
/// Counts every case; failure records are kept up to a cap so the
/// report stays readable for badly broken configurations.
#[derive(Clone, Debug, Default)]
pub struct TestReport {
    tag: String,
    cases: usize,
    failures: usize,
    records: Vec<FailureRecord>,
}

impl TestReport {
    const MAX_RECORDS: usize = 100;

    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            cases: 0,
            failures: 0,
            records: Vec::new(),
        }
    }

    /// What this report verified.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of cases executed.
    pub fn cases(&self) -> usize {
        self.cases
    }

    /// Number of failed cases.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// True if every case matched the reference.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// The recorded failures, capped at
    /// [`MAX_RECORDS`][Self::MAX_RECORDS].
    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    pub(crate) fn pass(&mut self) {
        self.cases += 1;
    }

    pub(crate) fn fail(&mut self, record: FailureRecord) {
        self.cases += 1;
        self.failures += 1;
        if self.records.len() < Self::MAX_RECORDS {
            self.records.push(record);
        }
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "{}: PASS ({} cases)", self.tag, self.cases)
        } else {
            writeln!(
                f,
                "{}: FAIL ({} of {} cases)",
                self.tag, self.failures, self.cases
            )?;
            for r in &self.records {
                writeln!(f, "  {}", r)?;
            }
            if self.failures > self.records.len() {
                writeln!(f, "  ... {} more", self.failures - self.records.len())?;
            }
            Ok(())
        }
    }
}
