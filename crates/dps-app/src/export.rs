//! Trace export of run histories.

use std::path::Path;

use dps_sim::History;
use serde::Serialize;

use crate::error::AppResult;

/// One row of the exported trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceRecord {
    pub t: usize,
    pub input: f64,
    pub noise: f64,
    pub system_output: f64,
    pub output: f64,
}

pub fn trace_records(history: &History) -> Vec<TraceRecord> {
    (0..history.len())
        .map(|t| TraceRecord {
            t,
            input: history.input()[t],
            noise: history.noise()[t],
            system_output: history.system_output()[t],
            output: history.output()[t],
        })
        .collect()
}

pub fn history_csv(history: &History) -> String {
    let mut csv = String::from("t,input,noise,system_output,output\n");
    for r in trace_records(history) {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            r.t, r.input, r.noise, r.system_output, r.output
        ));
    }
    csv
}

pub fn history_json(history: &History) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&trace_records(history))?)
}

pub fn write_csv(path: &Path, history: &History) -> AppResult<()> {
    std::fs::write(path, history_csv(history))?;
    Ok(())
}

pub fn write_json(path: &Path, history: &History) -> AppResult<()> {
    std::fs::write(path, history_json(history)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_sim::{Engine, Field};

    fn ticked_engine() -> Engine {
        let mut engine = Engine::new();
        engine.commit(Field::Gain, "2");
        engine.commit(Field::Tau, "5");
        engine.commit(Field::DeadTime, "1");
        engine.commit(Field::Period, "1");
        engine.commit(Field::StepMagnitude, "10");
        engine.tick();
        engine.tick();
        engine
    }

    #[test]
    fn csv_has_header_and_one_row_per_index() {
        let engine = ticked_engine();
        let csv = history_csv(engine.history());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "t,input,noise,system_output,output");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "0,0,0,0,0");
        assert!(lines[2].starts_with("1,10,0,"));
    }

    #[test]
    fn json_rows_match_history() {
        let engine = ticked_engine();
        let json = history_json(engine.history()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["t"], 2);
        assert_eq!(
            rows[2]["output"].as_f64().unwrap(),
            engine.history().output()[2]
        );
    }
}
