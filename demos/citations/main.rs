//! Basic Kindred Example - Citation Library
//!
//! This example demonstrates core Kindred functionality:
//! - Declaring an entity schema with defaults and transforms
//! - Creating entities with derived natural keys
//! - Querying by property and operator
//! - The stored form vs. the logical form of an entity
//!
//! Run with: cargo run -p citations

use kindred_codec::Value;
use kindred_core::{Attribute, Catalog, Dataset};
use kindred_store::{DocumentStore, InMemoryStore, Operator, Properties};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Citation Library Example");
    println!("========================\n");

    // Declare the schema once; transforms resolve eagerly here.
    let catalog = Catalog::builder()
        .entity("journal", None, vec![Attribute::new("name").key_component()])?
        .entity(
            "citation",
            Some("journal"),
            vec![
                Attribute::new("pmid").key_component(),
                Attribute::new("abstract").text().default(""),
                Attribute::new("year"),
                Attribute::new("pages"),
                Attribute::new("journal"),
                Attribute::new("authors").complex(),
            ],
        )?
        .build();
    println!("[OK] Schemas compiled: {} kinds", catalog.kinds().count());

    let store = Arc::new(InMemoryStore::new());
    let journals = Dataset::new(catalog.schema("journal")?.clone(), Arc::clone(&store));
    let citations = Dataset::new(catalog.schema("citation")?.clone(), Arc::clone(&store));

    // Create a journal to scope citations under.
    let nature = journals.create(None, Properties::new().with("name", "nature"))?;
    let nature_key = nature.key().expect("derived key");
    println!("[OK] Journal created under key {nature_key}");

    // Create citations; keys derive from pmid, scoped under the journal.
    println!("\n[+] Inserting citations...");
    let samples = [
        ("10022111", 2009, vec!["Joe", "Jim"]),
        ("10022112", 2010, vec!["Bob"]),
        ("10022113", 2010, vec!["Joe", "Bob"]),
    ];
    for (pmid, year, authors) in samples {
        let created = citations.create(
            Some(nature_key),
            Properties::new()
                .with("pmid", pmid)
                .with("abstract", "Lorem ipsum dolor sit amet")
                .with("year", year)
                .with("journal", "Nature")
                .with("authors", authors),
        )?;
        println!("  stored {}", created.key().expect("store-returned key"));
    }

    // The store holds the transformed form; reads restore the logical one.
    let sample = citations
        .find_first_by("pmid", "10022111")?
        .expect("just created");
    let raw = store.get(sample.key().expect("key"))?;
    println!("\n[*] Stored vs. logical form of the abstract:");
    println!("  stored:  {:?}", raw.get("abstract"));
    println!("  logical: {:?}", sample.get("abstract"));
    println!("  stored authors: {:?}", raw.get("authors"));
    println!("  logical authors: {:?}", sample.get("authors"));

    // Query by property.
    println!("\n[*] Citations from 2010:");
    for citation in citations.find_all_by("year", 2010)? {
        let authors = match citation.get("authors") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_text)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        };
        println!(
            "  {} ({})",
            citation.get("pmid").and_then(Value::as_text).unwrap_or("?"),
            authors
        );
    }

    let recent = citations
        .find_all_where("year", Operator::GreaterThan, 2009)?
        .count();
    println!("\n[#] Citations after 2009: {recent}");

    // Delete one citation by key.
    println!("\n[-] Deleting citation 10022112...");
    let doomed = citations
        .find_first_by("pmid", "10022112")?
        .expect("exists");
    citations.delete(std::slice::from_ref(doomed.key().expect("key")))?;
    println!("[#] Remaining citations: {}", citations.find_all()?.count());

    println!("\n[OK] Done");
    Ok(())
}
