//! Integration tests for the text pipeline of stratum-core:
//! detect an aggregate root, resolve names from its path, split an existing
//! companion and emit its replacement.

use std::path::Path;

use stratum_core::domain::source_layout::{resolve_class_name, resolve_simple_class_name};
use stratum_core::domain::{CUSTOM_CODE_BEGIN, filter_imports, render_repository_source};
use stratum_core::prelude::*;

const ENTITY: &str = "package com.acme.shop.domain;

import jakarta.persistence.Entity;

@Entity
@com.acme.ddd.AggregateRoot
public class Invoice {
}
";

const EXISTING: &str = "package com.acme.shop.adapter.domain.repositories;\r
\r
import com.acme.shop.domain.Invoice;\r
import java.time.LocalDate;\r
import java.util.List;\r
\r
@SuppressWarnings(\"unused\")\r
public interface InvoiceRepository extends Old<Invoice> {\r
    List<Invoice> findDueBefore(LocalDate date);\r
\r
    default boolean hasOpen() { return !findDueBefore(LocalDate.now()).isEmpty(); }\r
}\r
";

fn target() -> RepositoryTarget {
    let path = Path::new("shop-domain/src/main/java/com/acme/shop/domain/Invoice.java");
    RepositoryTarget {
        entity_class_name: resolve_class_name(path).unwrap(),
        entity_simple_name: resolve_simple_class_name(path).unwrap(),
        package_name: "com.acme.shop.adapter.domain.repositories".into(),
        file_path: "InvoiceRepository.java".into(),
        relocated: false,
    }
}

#[test]
fn qualified_marker_is_detected() {
    let detector = AggregateRootDetector::new("AggregateRoot").unwrap();
    assert!(detector.is_aggregate_root(ENTITY));
    assert!(!detector.is_aggregate_root("@AggregateRootFactory\npublic class X {}"));
}

#[test]
fn regenerated_source_keeps_body_and_drops_stale_header() {
    let config = RepositoryConfig::default()
        .with_base_interface("Repository<${EntityType}, ${IdentityType}>")
        .with_identity_type("InvoiceId");

    let mut sections = ExtractedFileSections::parse(EXISTING);
    sections.import_lines = filter_imports(&sections.import_lines, "Invoice");
    let source = render_repository_source(&target(), &sections, &config);

    assert_eq!(
        source,
        "package com.acme.shop.adapter.domain.repositories;

import com.acme.shop.domain.Invoice;
import java.time.LocalDate;
import java.util.List;

public interface InvoiceRepository extends Repository<Invoice, InvoiceId> {
    List<Invoice> findDueBefore(LocalDate date);

    default boolean hasOpen() { return !findDueBefore(LocalDate.now()).isEmpty(); }
}
"
    );
}

#[test]
fn file_without_declaration_is_regenerated_fresh() {
    let sections = ExtractedFileSections::parse("// scratch notes\nnothing to see\n");
    assert!(sections.is_fresh());

    let source = render_repository_source(&target(), &sections, &RepositoryConfig::default());
    assert!(source.contains(CUSTOM_CODE_BEGIN));
    assert!(source.contains("InvoiceJpaRepositoryAdapter"));
}
