//! Column bindings between the OPS mapping export and the generators.

/// Column names of the OPS/substance mapping export. Defaults match the
/// merged spreadsheet the pipeline was built for; every name can be
/// overridden on the command line.
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub coding: Vec<String>,
    pub display: String,
    pub route_code: String,
    pub route_display: String,
    pub ops_text: String,
    pub ops_code: String,
    pub unit_code: String,
    pub unit: String,
    pub low: String,
    pub high: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            coding: vec![
                "UNII_Substanz_allg".to_string(),
                "ASK_Substanz_allg".to_string(),
                "CAS_Substanz_allg".to_string(),
            ],
            display: "Substanz_allg_engl_INN_oder_sonst".to_string(),
            route_code: "Routes and Methods of Administration - Concept Code".to_string(),
            route_display: "Routes and Methods of Administration - Term".to_string(),
            ops_text: "opsText".to_string(),
            ops_code: "opsCode".to_string(),
            unit_code: "UCUM-Code".to_string(),
            unit: "UCUM-Description".to_string(),
            low: "Einheit_Wert_min".to_string(),
            high: "Einheit_Wert_max".to_string(),
        }
    }
}

impl ColumnConfig {
    /// All columns to load from the file.
    ///
    /// `ops_code` is only read when procedures are generated; an optional
    /// per-row OPS version column is appended by the caller.
    pub fn usecols(&self, with_procedure: bool) -> Vec<String> {
        let mut columns = vec![
            self.display.clone(),
            self.route_code.clone(),
            self.route_display.clone(),
            self.ops_text.clone(),
            self.unit_code.clone(),
            self.unit.clone(),
            self.low.clone(),
            self.high.clone(),
        ];
        if with_procedure {
            columns.push(self.ops_code.clone());
        }
        columns.extend(self.coding.iter().cloned());
        columns
    }

    /// Columns a row must populate to survive loading.
    ///
    /// The high dose value is optional (it decides quantity vs range) and
    /// the substance registry columns are sparse by nature.
    pub fn required(&self, with_procedure: bool) -> Vec<String> {
        let mut columns = vec![
            self.display.clone(),
            self.route_code.clone(),
            self.route_display.clone(),
            self.ops_text.clone(),
            self.unit_code.clone(),
            self.unit.clone(),
            self.low.clone(),
        ];
        if with_procedure {
            columns.push(self.ops_code.clone());
        }
        columns
    }

    /// The numeric columns needing decimal-comma normalization.
    pub fn numeric(&self) -> Vec<String> {
        vec![self.low.clone(), self.high.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_and_codings_are_never_required() {
        let columns = ColumnConfig::default();
        let required = columns.required(true);
        assert!(!required.contains(&columns.high));
        for coding in &columns.coding {
            assert!(!required.contains(coding));
        }
    }

    #[test]
    fn test_ops_code_only_loaded_for_procedures() {
        let columns = ColumnConfig::default();
        assert!(!columns.usecols(false).contains(&columns.ops_code));
        assert!(columns.usecols(true).contains(&columns.ops_code));
    }
}
