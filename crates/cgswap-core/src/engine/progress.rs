#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// A residue was replaced; emitted once per applied substitution.
    Substituted {
        residue_index: usize,
        residue_name: String,
    },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::TaskIncrement);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let tag = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::TaskStart { total_steps } => format!("start {total_steps}"),
                Progress::Substituted {
                    residue_index,
                    residue_name,
                } => format!("{residue_index}:{residue_name}"),
                Progress::Message(text) => text,
                _ => "other".to_string(),
            };
            seen.lock().unwrap().push(tag);
        }));

        reporter.report(Progress::PhaseStart { name: "Substitution" });
        reporter.report(Progress::TaskStart { total_steps: 2 });
        reporter.report(Progress::Substituted {
            residue_index: 2,
            residue_name: "ALA".into(),
        });
        reporter.report(Progress::Message("swap".into()));
        reporter.report(Progress::TaskFinish);
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["Substitution", "start 2", "2:ALA", "swap", "other"]
        );
    }
}
