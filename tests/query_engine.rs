//! Query Engine Scenario Tests
//!
//! End-to-end scenarios against a virtual instance, mirroring how a caller
//! exercises the test double:
//! - insert then query by generated identifier
//! - null comparison semantics (`= null` / `!= null`)
//! - comparison operators, including against absent fields
//! - boolean precedence and parentheses
//! - ORDER BY stability and LIMIT truncation

use mockforce::query::QueryError;
use mockforce::store::VirtualInstance;
use serde_json::json;

// =============================================================================
// Basic queries
// =============================================================================

#[test]
fn test_basic_query() {
    let mut org = VirtualInstance::new();
    org.insert("Contact", json!({"Name": "Ozzy Osbourne"}))
        .unwrap();

    let records = org.query("SELECT Id, Name FROM Contact LIMIT 1").unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["Id"].as_str().unwrap().len(), 18);
    assert_eq!(record["Name"], json!("Ozzy Osbourne"));
    assert_eq!(record["attributes"]["type"], json!("Contact"));
}

#[test]
fn test_where_basic_query() {
    let mut org = VirtualInstance::new();
    let jim = org
        .insert("Lead", json!({"Name": "Jim Bean", "Title": "CDO"}))
        .unwrap();
    org.insert("Lead", json!({"Name": "Corey Taylor", "Title": "Singer"}))
        .unwrap();

    let records = org
        .query("SELECT Id, Name FROM Lead WHERE Id = 'nothing'")
        .unwrap();
    assert_eq!(records.len(), 0);

    let records = org
        .query("SELECT Id, Name FROM Lead WHERE Name = null")
        .unwrap();
    assert_eq!(records.len(), 0);

    let records = org
        .query(&format!(
            "SELECT Id, Name, Title FROM Lead WHERE Id = '{}'",
            jim.id()
        ))
        .unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["Id"], json!(jim.id()));
    assert_eq!(record["Name"], json!("Jim Bean"));
    assert_eq!(record["Title"], json!("CDO"));
}

// =============================================================================
// Comparison operators
// =============================================================================

#[test]
fn test_where_comparison_query() {
    // (operator, bound, expected match count) — the second record has no
    // Human_Score__c, so ordering comparisons always exclude it
    let cases = [
        ("<", 100, 0),
        ("<", 120, 1),
        ("<=", 100, 1),
        ("<=", 5, 0),
        (">", 101, 0),
        (">", 4, 1),
        (">=", 100, 1),
        (">=", 999, 0),
    ];

    for (operator, bound, expected) in cases {
        let mut org = VirtualInstance::new();
        let outcomes = org.bulk_insert(
            "Lead",
            vec![
                json!({
                    "Name": "Kurt Cobain",
                    "Title": "Nirvana Guitarist",
                    "Human_Score__c": 100,
                }),
                json!({"Name": "Paris Hilton", "Title": "no one knows"}),
            ],
        );
        let kurt_id = outcomes[0].as_ref().unwrap().id().to_string();

        let records = org
            .query(&format!(
                "SELECT Id, Name, Human_Score__c FROM Lead WHERE Human_Score__c {} {}",
                operator, bound
            ))
            .unwrap();
        assert_eq!(
            records.len(),
            expected,
            "Human_Score__c {} {}",
            operator,
            bound
        );

        if expected > 0 {
            let record = &records[0];
            assert_eq!(record["Id"], json!(kurt_id));
            assert_eq!(record["Name"], json!("Kurt Cobain"));
            assert_eq!(record["Human_Score__c"].as_f64(), Some(100.0));
        }
    }
}

// =============================================================================
// Boolean combinators and null semantics
// =============================================================================

#[test]
fn test_where_complex_query() {
    let mut org = VirtualInstance::new();
    let tarantino = org
        .insert(
            "SomeFamousPerson__c",
            json!({"Name": "Quentin Tarantino", "Title": "Director"}),
        )
        .unwrap();
    let spielberg = org
        .insert(
            "SomeFamousPerson__c",
            json!({"Name": "Steven Spielberg", "Title": "Director"}),
        )
        .unwrap();
    let adams = org
        .insert(
            "SomeFamousPerson__c",
            json!({"Name": "Amy Adams", "Title": "Actor"}),
        )
        .unwrap();

    let records = org
        .query(
            "SELECT Id, Name FROM SomeFamousPerson__c \
             WHERE Name = 'Quentin Tarantino' OR Name = 'Amy Adams'",
        )
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Id"], json!(tarantino.id()));
    assert_eq!(records[1]["Id"], json!(adams.id()));

    let records = org
        .query(
            "SELECT Id, Name FROM SomeFamousPerson__c \
             WHERE (Title = 'Director' OR Name = 'Amy Adams') AND Id != null",
        )
        .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["Id"], json!(tarantino.id()));
    assert_eq!(records[1]["Id"], json!(spielberg.id()));
    assert_eq!(records[2]["Id"], json!(adams.id()));

    let records = org
        .query(
            "SELECT Id, Name FROM SomeFamousPerson__c \
             WHERE (Title = 'Actor' OR Title = 'Director') AND Name = null",
        )
        .unwrap();
    assert_eq!(records.len(), 0);

    let records = org
        .query(
            "SELECT Id, Name FROM SomeFamousPerson__c \
             WHERE (Title = 'Actor' OR Title = 'Director') \
             AND (Name != null AND Name = 'Quentin Tarantino')",
        )
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Id"], json!(tarantino.id()));
}

#[test]
fn test_null_presence_partition() {
    // Three records: field present, field explicitly null, field absent.
    // `= null` and `!= null` must partition them exactly.
    let mut org = VirtualInstance::new();
    org.insert("Lead", json!({"Name": "Jim", "Title": "CDO"}))
        .unwrap();
    org.insert("Lead", json!({"Name": "Corey", "Title": null}))
        .unwrap();
    org.insert("Lead", json!({"Name": "Paris"})).unwrap();

    let null_set = org
        .query("SELECT Name FROM Lead WHERE Title = null")
        .unwrap();
    let present_set = org
        .query("SELECT Name FROM Lead WHERE Title != null")
        .unwrap();

    assert_eq!(null_set.len(), 2);
    assert_eq!(present_set.len(), 1);
    assert_eq!(present_set[0]["Name"], json!("Jim"));
}

#[test]
fn test_ordering_against_absent_field_never_errors() {
    let mut org = VirtualInstance::new();
    org.insert("Lead", json!({"Name": "Paris"})).unwrap();

    for operator in ["<", "<=", ">", ">="] {
        let records = org
            .query(&format!("SELECT Id FROM Lead WHERE n {} 5", operator))
            .unwrap();
        assert_eq!(records.len(), 0, "n {} 5", operator);
    }
}

// =============================================================================
// Ordering and limits
// =============================================================================

#[test]
fn test_order_by_query() {
    let mut org = VirtualInstance::new();
    org.bulk_insert(
        "Account",
        vec![
            json!({"Name": "Google", "AlexaRanking__c": 1}),
            json!({"Name": "YouTube", "AlexaRanking__c": 2}),
            json!({"Name": "Facebook", "AlexaRanking__c": 7}),
        ],
    );

    let records = org
        .query("SELECT Id, Name FROM Account ORDER BY Name ASC")
        .unwrap();

    assert_eq!(records[0]["Name"], json!("Facebook"));
    assert_eq!(records[1]["Name"], json!("Google"));
    assert_eq!(records[2]["Name"], json!("YouTube"));
}

#[test]
fn test_order_by_numeric_ascending() {
    let mut org = VirtualInstance::new();
    org.bulk_insert(
        "Account",
        vec![
            json!({"Name": "Facebook", "AlexaRanking__c": 7}),
            json!({"Name": "Google", "AlexaRanking__c": 1}),
            json!({"Name": "YouTube", "AlexaRanking__c": 2}),
        ],
    );

    let records = org
        .query("SELECT AlexaRanking__c FROM Account ORDER BY AlexaRanking__c ASC")
        .unwrap();
    let ranks: Vec<f64> = records
        .iter()
        .map(|r| r["AlexaRanking__c"].as_f64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1.0, 2.0, 7.0]);
}

#[test]
fn test_limit_bounds() {
    let mut org = VirtualInstance::new();
    org.bulk_insert(
        "Account",
        vec![
            json!({"Name": "Google"}),
            json!({"Name": "YouTube"}),
            json!({"Name": "Facebook"}),
        ],
    );

    assert_eq!(org.query("SELECT Id FROM Account LIMIT 0").unwrap().len(), 0);
    assert_eq!(org.query("SELECT Id FROM Account LIMIT 2").unwrap().len(), 2);
    assert_eq!(
        org.query("SELECT Id FROM Account LIMIT 99").unwrap().len(),
        3
    );
}

// =============================================================================
// Error surfacing
// =============================================================================

#[test]
fn test_syntax_error_is_distinct_from_empty_result() {
    let mut org = VirtualInstance::new();
    org.insert("Lead", json!({"Name": "Jim"})).unwrap();

    let err = org.query("SELECT Id FROM Lead WHERE").unwrap_err();
    assert!(matches!(err, QueryError::Syntax { .. }));

    let err = org.query("SELECT Id, Id FROM Lead").unwrap_err();
    assert!(matches!(err, QueryError::Syntax { .. }));

    let empty = org
        .query("SELECT Id FROM Lead WHERE Name = 'nobody'")
        .unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_projection_of_undeclared_field_is_null() {
    let mut org = VirtualInstance::new();
    org.insert("Lead", json!({"Name": "Jim"})).unwrap();

    let records = org.query("SELECT Name, Imaginary__c FROM Lead").unwrap();
    assert_eq!(records[0]["Imaginary__c"], serde_json::Value::Null);

    let keys: Vec<&String> = records[0].keys().collect();
    assert_eq!(keys, vec!["attributes", "Name", "Imaginary__c"]);
}
