//! Canonical document rendering.

use crate::record::Record;

/// Render one record into its canonical document string.
///
/// The template and its field order are fixed constants of the system: the
/// same record always yields the same document. Absent fields leave their
/// slot empty rather than failing the render.
pub fn render_document(record: &Record) -> String {
    format!(
        "Employee {} {} (Company ID {}) works in {} as {} on team {}. \
         Branch: {}. Hire Date: {}. Monthly Salary: {}. Annual Salary: {}. \
         Age: {}. TenureYears: {}.",
        record.display("First Name"),
        record.display("Last Name"),
        record.display("Six Digit Company ID#"),
        record.display("Department"),
        record.display("Job Title"),
        record.display("Team"),
        record.display("Branch Location"),
        record.display("Hire Date"),
        record.display("Monthly Salary"),
        record.display("Annual Salary"),
        record.display("Age"),
        record.display("TenureYears"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_record() -> Record {
        Record::new()
            .with("First Name", Value::Text("Dana".to_string()))
            .with("Last Name", Value::Text("Kim".to_string()))
            .with("Six Digit Company ID#", Value::Text("483920".to_string()))
            .with("Department", Value::Text("Retail Banking".to_string()))
            .with("Job Title", Value::Text("Teller".to_string()))
            .with("Team", Value::Text("Front Desk".to_string()))
            .with("Branch Location", Value::Text("Downtown".to_string()))
            .with(
                "Hire Date",
                Value::Date(NaiveDate::from_ymd_opt(2020, 5, 11).unwrap()),
            )
            .with("Monthly Salary", Value::Number(3800.0))
            .with("Annual Salary", Value::Number(45600.0))
            .with("Age", Value::Number(29.4))
            .with("TenureYears", Value::Number(4.25))
    }

    #[test]
    fn renders_full_record() {
        let doc = render_document(&sample_record());
        assert_eq!(
            doc,
            "Employee Dana Kim (Company ID 483920) works in Retail Banking as \
             Teller on team Front Desk. Branch: Downtown. Hire Date: \
             2020-05-11. Monthly Salary: 3800. Annual Salary: 45600. Age: \
             29.4. TenureYears: 4.25."
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = sample_record();
        assert_eq!(render_document(&record), render_document(&record));
    }

    #[test]
    fn missing_department_leaves_slot_empty() {
        let record = Record::new()
            .with("First Name", Value::Text("Omar".to_string()))
            .with("Last Name", Value::Text("Haddad".to_string()));
        let doc = render_document(&record);

        assert!(doc.contains("works in  as"));
        assert!(!doc.contains("None"));
        assert!(!doc.contains("null"));
    }

    #[test]
    fn null_field_renders_like_missing_field() {
        let with_null = Record::new().with("Department", Value::Null);
        let without = Record::new();
        assert_eq!(render_document(&with_null), render_document(&without));
    }
}
