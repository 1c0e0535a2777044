//! Single-line `key=value` rendering of a plan for audit logs.

use std::fmt;

use super::RunPlan;
use crate::config::keys;

impl RunPlan {
    /// Flat `key=value` summary, space-separated. Hosts are comma-joined.
    pub fn summary(&self) -> String {
        let input_path = self
            .input_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let fields: [(&str, String); 13] = [
            (keys::PROTOCOL, self.protocol.to_string()),
            (keys::HOST, self.hosts().join(",")),
            (keys::PORT, self.port.to_string()),
            (keys::USER, self.credentials.user.clone()),
            (keys::PASSWORD, self.credentials.password.clone()),
            (keys::INPUT_PATH, input_path),
            (keys::OUTPUT_PATH, self.output_path.display().to_string()),
            (keys::NUM_THREADS, self.num_workers.to_string()),
            (keys::SHARED, self.is_shared().to_string()),
            (keys::REPORT_TIME, self.report_time.to_string()),
            (keys::RECORD_RESULTS, self.record_results.to_string()),
            (keys::THINK_MILLIS, self.think_millis.to_string()),
            (keys::TEST_TYPE, self.test_type.to_string()),
        ];

        fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RunPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
