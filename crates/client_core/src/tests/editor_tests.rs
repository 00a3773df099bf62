use std::str::FromStr;

use rust_decimal::Decimal;

use super::*;

fn product(id: i64, name: &str, description: Option<&str>, price: &str) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        description: description.map(str::to_string),
        price: Decimal::from_str(price).expect("price"),
    }
}

fn pen() -> Product {
    product(1, "Pen", None, "1.50")
}

fn single(mut requests: Vec<Request>) -> Request {
    assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
    requests.remove(0)
}

fn listed(seq: u64, products: Vec<Product>) -> EditorEvent {
    EditorEvent::Completed(Completion {
        seq,
        result: Ok(Reply::Listed(products)),
    })
}

fn failed(seq: u64, reason: &str) -> EditorEvent {
    EditorEvent::Completed(Completion {
        seq,
        result: Err(reason.to_string()),
    })
}

fn loaded_editor(policy: SyncPolicy, products: Vec<Product>) -> ProductListEditor {
    let mut editor = ProductListEditor::new(policy);
    let fetch = single(editor.apply(EditorEvent::Mounted));
    assert!(editor.apply(listed(fetch.seq, products)).is_empty());
    editor
}

#[test]
fn mount_issues_a_single_listing_request() {
    let mut editor = ProductListEditor::default();
    let request = single(editor.apply(EditorEvent::Mounted));

    assert_eq!(request.operation, Operation::FetchAll);
    assert_eq!(editor.in_flight(), 1);
}

#[test]
fn successful_listing_replaces_collection_in_server_order() {
    let server = vec![
        product(3, "Stapler", Some("Heavy duty"), "12.00"),
        product(1, "Pen", None, "1.50"),
        product(2, "Ink", Some(""), "4.25"),
    ];
    let editor = loaded_editor(SyncPolicy::Refetch, server.clone());

    assert_eq!(editor.products(), server.as_slice());
    assert_eq!(editor.in_flight(), 0);
}

#[test]
fn failed_listing_keeps_previous_collection_and_raises_notice() {
    let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
    let fetch = single(editor.apply(EditorEvent::Refresh));

    assert!(editor.apply(failed(fetch.seq, "connection refused")).is_empty());

    assert_eq!(editor.products(), [pen()].as_slice());
    let notice = editor.notice().expect("notice");
    assert_eq!(notice.severity, NoticeSeverity::Error);
    assert!(notice.message.contains("connection refused"));
}

#[test]
fn start_edit_copies_fields_and_targets_product() {
    let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
    assert!(editor.apply(EditorEvent::StartEdit(pen())).is_empty());

    assert_eq!(
        editor.form(),
        &FormState {
            name: "Pen".to_string(),
            description: String::new(),
            price: "1.5".to_string(),
        }
    );
    assert_eq!(editor.target(), EditingTarget::Product(ProductId(1)));
}

#[test]
fn start_edit_switches_target_when_already_editing() {
    let mut editor = ProductListEditor::default();
    editor.start_edit(&pen());
    editor.start_edit(&product(2, "Ink", Some("Blue"), "4.25"));

    assert_eq!(editor.target().product_id(), Some(ProductId(2)));
    assert_eq!(editor.form().description, "Blue");
    assert_eq!(editor.form().price, "4.25");
}

#[test]
fn submit_while_browsing_issues_create_and_clears_form() {
    let mut editor = ProductListEditor::default();
    *editor.form_mut() = FormState {
        name: "Notebook".to_string(),
        description: "A5".to_string(),
        price: "7.25".to_string(),
    };

    let request = single(editor.apply(EditorEvent::Submit));

    assert_eq!(
        request.operation,
        Operation::Create(ProductPayload {
            name: "Notebook".to_string(),
            description: "A5".to_string(),
            price: Decimal::from_str("7.25").expect("price"),
        })
    );
    assert!(editor.form().is_empty());
    assert_eq!(editor.target(), EditingTarget::None);
}

#[test]
fn submit_while_editing_issues_update_and_returns_to_browsing() {
    let mut editor = ProductListEditor::default();
    editor.start_edit(&pen());
    editor.form_mut().name = "Fountain pen".to_string();

    let request = single(editor.submit());

    match request.operation {
        Operation::Update { id, payload } => {
            assert_eq!(id, ProductId(1));
            assert_eq!(payload.name, "Fountain pen");
            assert_eq!(payload.price, Decimal::from_str("1.5").expect("price"));
        }
        other => panic!("unexpected operation: {other:?}"),
    }
    assert_eq!(editor.target(), EditingTarget::None);
    assert!(editor.form().is_empty());
}

#[test]
fn unparsable_or_empty_price_is_submitted_as_zero() {
    for raw in ["", "twelve", "  "] {
        let mut editor = ProductListEditor::default();
        editor.form_mut().name = "Eraser".to_string();
        editor.form_mut().price = raw.to_string();

        let request = single(editor.submit());
        let Operation::Create(payload) = request.operation else {
            panic!("expected create");
        };
        assert_eq!(payload.price, Decimal::ZERO, "price text {raw:?}");
    }
}

#[test]
fn submit_without_name_is_rejected_locally() {
    let mut editor = ProductListEditor::default();
    editor.start_edit(&pen());
    editor.form_mut().name = "   ".to_string();

    assert!(editor.submit().is_empty());

    assert_eq!(editor.target(), EditingTarget::Product(ProductId(1)));
    assert_eq!(editor.form().price, "1.5");
    assert_eq!(
        editor.notice().map(|notice| notice.severity),
        Some(NoticeSeverity::Warning)
    );
    assert_eq!(editor.in_flight(), 0);
}

#[test]
fn mutation_completion_triggers_refetch_under_refetch_policy() {
    let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
    editor.form_mut().name = "Ink".to_string();
    let create = single(editor.submit());

    let follow_up = single(editor.apply(EditorEvent::Completed(Completion {
        seq: create.seq,
        result: Ok(Reply::Saved(product(2, "Ink", None, "4.00"))),
    })));

    assert_eq!(follow_up.operation, Operation::FetchAll);
    // Nothing is patched locally until the listing arrives.
    assert_eq!(editor.products(), [pen()].as_slice());
}

#[test]
fn failed_create_still_clears_form_and_refetches() {
    let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
    editor.form_mut().name = "Ink".to_string();
    let create = single(editor.submit());

    let follow_up = single(editor.apply(failed(create.seq, "500 Internal Server Error")));

    assert_eq!(follow_up.operation, Operation::FetchAll);
    assert!(editor.form().is_empty());
    assert_eq!(editor.target(), EditingTarget::None);
    let notice = editor.notice().expect("notice");
    assert!(notice.message.contains("Ink"));
}

#[test]
fn delete_keeps_editing_target_and_refetches_on_any_outcome() {
    for outcome in [Ok(Reply::Deleted), Err("404 Not Found".to_string())] {
        let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
        editor.start_edit(&pen());

        let delete = single(editor.apply(EditorEvent::Delete(ProductId(1))));
        assert_eq!(delete.operation, Operation::Delete(ProductId(1)));
        assert_eq!(editor.target(), EditingTarget::Product(ProductId(1)));

        let follow_up = single(editor.apply(EditorEvent::Completed(Completion {
            seq: delete.seq,
            result: outcome,
        })));
        assert_eq!(follow_up.operation, Operation::FetchAll);
        assert_eq!(editor.target(), EditingTarget::Product(ProductId(1)));
    }
}

#[test]
fn cancel_edit_clears_form_without_requests() {
    let mut editor = ProductListEditor::default();
    editor.start_edit(&pen());

    assert!(editor.apply(EditorEvent::CancelEdit).is_empty());
    assert!(editor.form().is_empty());
    assert_eq!(editor.target(), EditingTarget::None);
}

#[test]
fn out_of_order_stale_listing_is_dropped() {
    let mut editor = ProductListEditor::default();
    let older = single(editor.fetch_all());
    let newer = single(editor.fetch_all());

    assert!(editor
        .apply(listed(newer.seq, vec![product(2, "Ink", None, "4.00")]))
        .is_empty());
    assert!(editor.apply(listed(older.seq, vec![pen()])).is_empty());

    assert_eq!(editor.products()[0].name, "Ink");
    assert_eq!(editor.in_flight(), 0);
}

#[test]
fn unknown_completion_is_ignored() {
    let mut editor = loaded_editor(SyncPolicy::Refetch, vec![pen()]);
    assert!(editor.apply(listed(99, Vec::new())).is_empty());
    assert_eq!(editor.products().len(), 1);
}

#[test]
fn apply_response_policy_patches_collection_without_refetch() {
    let mut editor = loaded_editor(SyncPolicy::ApplyResponse, vec![pen()]);

    editor.form_mut().name = "Ink".to_string();
    let create = single(editor.submit());
    assert!(editor
        .apply(EditorEvent::Completed(Completion {
            seq: create.seq,
            result: Ok(Reply::Saved(product(2, "Ink", None, "4.00"))),
        }))
        .is_empty());

    editor.start_edit(&pen());
    editor.form_mut().price = "2".to_string();
    let update = single(editor.submit());
    assert!(editor
        .apply(EditorEvent::Completed(Completion {
            seq: update.seq,
            result: Ok(Reply::Saved(product(1, "Pen", None, "2.00"))),
        }))
        .is_empty());

    let names: Vec<_> = editor.products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Pen", "Ink"]);
    assert_eq!(editor.products()[0].price.to_string(), "2.00");

    let delete = single(editor.delete(ProductId(1)));
    assert!(editor
        .apply(EditorEvent::Completed(Completion {
            seq: delete.seq,
            result: Ok(Reply::Deleted),
        }))
        .is_empty());
    assert_eq!(editor.products().len(), 1);
    assert_eq!(editor.products()[0].id, ProductId(2));
}

#[test]
fn apply_response_policy_refetches_after_failure() {
    let mut editor = loaded_editor(SyncPolicy::ApplyResponse, vec![pen()]);
    let delete = single(editor.delete(ProductId(1)));

    let follow_up = single(editor.apply(failed(delete.seq, "timed out")));
    assert_eq!(follow_up.operation, Operation::FetchAll);
    assert_eq!(editor.products(), [pen()].as_slice());
}

#[test]
fn listing_older_than_a_patched_mutation_triggers_another_fetch() {
    let mut editor = ProductListEditor::new(SyncPolicy::ApplyResponse);
    let mount = single(editor.fetch_all());
    editor.form_mut().name = "Ink".to_string();
    let create = single(editor.submit());

    assert!(editor
        .apply(EditorEvent::Completed(Completion {
            seq: create.seq,
            result: Ok(Reply::Saved(product(2, "Ink", None, "4.00"))),
        }))
        .is_empty());

    let follow_up = single(editor.apply(listed(mount.seq, vec![pen()])));
    assert_eq!(follow_up.operation, Operation::FetchAll);
    assert_eq!(editor.products(), [pen()].as_slice());
}

#[test]
fn dismiss_clears_notice() {
    let mut editor = ProductListEditor::default();
    editor.submit();
    assert!(editor.notice().is_some());

    editor.apply(EditorEvent::DismissNotice);
    assert!(editor.notice().is_none());
}

#[test]
fn sync_policy_parses_config_spellings() {
    assert_eq!("refetch".parse::<SyncPolicy>(), Ok(SyncPolicy::Refetch));
    assert_eq!(
        "Apply-Response".parse::<SyncPolicy>(),
        Ok(SyncPolicy::ApplyResponse)
    );
    assert!("eventually".parse::<SyncPolicy>().is_err());
    assert_eq!(SyncPolicy::ApplyResponse.to_string(), "apply_response");
}
