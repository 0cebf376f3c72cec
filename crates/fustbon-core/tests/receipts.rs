//! End-to-end parsing of receipt texts as the PDF extractor produces them.

use chrono::{FixedOffset, TimeZone};
use pretty_assertions::assert_eq;

use fustbon_core::receipt::rules::{format_date_token, line_items, parse_date_token};
use fustbon_core::{
    classify, Counterparty, DocumentType, FustbonError, FustbonParser, LineItem, ParseError,
    PlainTextExtractor, ReceiptParser,
};

const ISSUE_RECEIPT: &str = "\
BON UITGIFTE
70012345
Aalsmeer
5-mrt-24 14:30 uur
Transactiedatum
104711
Klantnummer
KlantnaamKwekerij De Zonnebloem
Transactienummer
Van der Berg Transport
F1234567890-01
Pasnummer
FustcodeStuks
Gerelateerd Tr.nr.
Correctie reden
520 Bloemendoos 19cm726
566 Deksel Bloemendoos-26
212 Stapelwagen Deense1.040
Creatiedatum5-mrt-24 14:32 uur
Deze bon is het bewijs van de uitgifte van fust. Er kunnen geen wijzigingen
worden aangebracht. Opmerkingen :
";

const INTAKE_RECEIPT: &str = "\
BON INNAME
70012346
Rijnsburg
12-okt-23 09:05 uur
Transactiedatum
204711
Klantnummer
KlantnaamBloemen BV
Transactienummer
FustcodeStuks
Gerelateerd Tr.nr.
70012000
Correctie reden
Verkeerd aantal geteld
Pallet beschadigd retourOpmerkingen :
800 Emmer 14 liter-12
Creatiedatum12-okt-23 09:10 uur
Deze bon is het bewijs van inname.
";

const TRANSFER_RECEIPT: &str = "\
FUSTBON
80012345
Kwekerij De Tuin
Klantnaam
1001
Klantnummer van
Correctie reden
Klantnummer naar
2002
Transactienummer
FustcodeStuks
KlantnaamBloemen BV
31-dec-24 23:59 uur
520 Bloemendoos 19cm2.500
Overboeking
Deze bon is het bewijs van overboeking.
";

fn parser() -> FustbonParser<PlainTextExtractor> {
    FustbonParser::with_extractor(PlainTextExtractor)
}

fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

#[test]
fn issue_receipt_end_to_end() {
    let tx = parser().parse_document(ISSUE_RECEIPT.as_bytes()).unwrap();

    assert_eq!(tx.document_type(), DocumentType::IssueReceipt);
    assert_eq!(tx.transaction_number, "70012345");
    assert_eq!(tx.location(), Some("Aalsmeer"));
    assert_eq!(tx.counterparty_from(), None);
    assert_eq!(
        tx.counterparty_to(),
        &Counterparty {
            code: Some("104711".to_string()),
            name: Some("Kwekerij De Zonnebloem".to_string()),
        }
    );
    assert_eq!(tx.carrier.as_deref(), Some("Van der Berg Transport"));
    assert_eq!(tx.card_number(), Some("F1234567890-01"));
    assert_eq!(tx.transaction_timestamp, Some(local(2024, 3, 5, 14, 30)));
    assert_eq!(tx.related_transaction_number, None);
    assert_eq!(tx.correction_reason, None);
    assert_eq!(tx.remarks, None);
    assert_eq!(
        tx.line_items,
        vec![
            LineItem {
                code: "520".to_string(),
                description: "Bloemendoos 19cm".to_string(),
                quantity: 726,
            },
            LineItem {
                code: "566".to_string(),
                description: "Deksel Bloemendoos".to_string(),
                quantity: -26,
            },
            LineItem {
                code: "212".to_string(),
                description: "Stapelwagen Deense".to_string(),
                quantity: 1040,
            },
        ]
    );
    assert_eq!(tx.raw_text, ISSUE_RECEIPT);
    assert!(tx.validate().is_empty());
}

#[test]
fn creation_date_is_read_from_its_label() {
    let tx = parser().parse_text(ISSUE_RECEIPT).unwrap();
    assert_eq!(tx.creation_timestamp, Some(local(2024, 3, 5, 14, 32)));
}

#[test]
fn intake_receipt_with_correction_and_remarks() {
    let tx = parser().parse_text(INTAKE_RECEIPT).unwrap();

    assert_eq!(tx.document_type(), DocumentType::IntakeReceipt);
    assert_eq!(tx.transaction_number, "70012346");
    assert_eq!(tx.location(), Some("Rijnsburg"));
    assert_eq!(tx.counterparty_to().code.as_deref(), Some("204711"));
    assert_eq!(tx.counterparty_to().name.as_deref(), Some("Bloemen BV"));
    assert_eq!(tx.carrier, None);
    assert_eq!(tx.card_number(), None);
    assert_eq!(tx.related_transaction_number.as_deref(), Some("70012000"));
    assert_eq!(tx.correction_reason.as_deref(), Some("Verkeerd aantal geteld"));
    assert_eq!(tx.remarks.as_deref(), Some("Pallet beschadigd retour"));
    assert_eq!(tx.transaction_timestamp, Some(local(2023, 10, 12, 9, 5)));
    assert_eq!(tx.creation_timestamp, Some(local(2023, 10, 12, 9, 10)));
    assert_eq!(tx.line_items.len(), 1);
    assert_eq!(tx.line_items[0].quantity, -12);
}

#[test]
fn transfer_receipt_end_to_end() {
    let tx = parser().parse_text(TRANSFER_RECEIPT).unwrap();

    assert_eq!(tx.document_type(), DocumentType::TransferReceipt);
    assert_eq!(tx.transaction_number, "80012345");
    assert_eq!(
        tx.counterparty_from(),
        Some(&Counterparty {
            code: Some("1001".to_string()),
            name: Some("Kwekerij De Tuin".to_string()),
        })
    );
    assert_eq!(
        tx.counterparty_to(),
        &Counterparty {
            code: Some("2002".to_string()),
            name: Some("Bloemen BV".to_string()),
        }
    );
    assert_eq!(tx.location(), None);
    assert_eq!(tx.card_number(), None);
    assert_eq!(tx.carrier, None);
    assert_eq!(tx.correction_reason, None);
    assert_eq!(tx.transaction_timestamp, Some(local(2024, 12, 31, 23, 59)));
    assert_eq!(tx.line_items.len(), 1);
    assert_eq!(tx.line_items[0].quantity, 2500);
    assert!(tx.validate().is_empty());
}

#[test]
fn minimal_issue_receipt() {
    let text = "BON UITGIFTE\n70019999\n520 Bloemendoos 19cm726\n";
    let tx = parser().parse(text).unwrap();

    assert_eq!(tx.document_type(), DocumentType::IssueReceipt);
    assert_eq!(tx.transaction_number, "70019999");
    assert_eq!(tx.line_items.len(), 1);
}

#[test]
fn anchors_alone_classify() {
    assert_eq!(classify("BON UITGIFTE"), Ok(DocumentType::IssueReceipt));
    assert_eq!(classify("BON INNAME"), Ok(DocumentType::IntakeReceipt));
    assert_eq!(classify("FUSTBON"), Ok(DocumentType::TransferReceipt));

    let parser = parser();
    assert_eq!(
        parser.classify_document(b"FUSTBON").unwrap(),
        DocumentType::TransferReceipt
    );
}

#[test]
fn unclassifiable_text_yields_no_record() {
    let text = "Pakbon\n70012345\n520 Bloemendoos 19cm726\n";

    assert_eq!(parser().parse_text(text), Err(ParseError::UnclassifiableDocument));
    assert!(matches!(
        parser().parse_document(text.as_bytes()),
        Err(FustbonError::Parse(ParseError::UnclassifiableDocument))
    ));
}

#[test]
fn column_header_is_never_the_carrier() {
    let text = "\
BON INNAME
70012346
Rijnsburg
Transactienummer
FustcodeStuks
800 Emmer 14 liter12
";
    let tx = parser().parse_text(text).unwrap();
    assert_eq!(tx.carrier, None);
}

#[test]
fn disclaimer_is_never_the_remarks() {
    let text = "\
BON UITGIFTE
70012345
Aalsmeer
520 Bloemendoos 19cm726
Deze bon is het bewijs van uitgifte. Opmerkingen :
";
    let tx = parser().parse_text(text).unwrap();
    assert_eq!(tx.remarks, None);
}

#[test]
fn line_item_scan_is_restartable() {
    let section = "520 Bloemendoos 19cm726\n566 Deksel-26\n212 Stapelwagen1.040\n";

    let first: Vec<_> = line_items(section).collect();
    let second: Vec<_> = line_items(section).collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn date_tokens_round_trip() {
    for token in ["5-mrt-24 14:30 uur", "1-jan-00 00:00 uur", "28-feb-25 08:07 uur"] {
        let timestamp = parse_date_token(token).unwrap();
        assert_eq!(format_date_token(&timestamp), token);
    }
}

#[test]
fn json_output_is_stable() {
    let tx = parser().parse_text(TRANSFER_RECEIPT).unwrap();
    let json = serde_json::to_value(&tx).unwrap();

    assert_eq!(json["document_type"], "FUSTBON Overboeking");
    assert_eq!(json["transaction_number"], "80012345");
    assert_eq!(json["to"]["name"], "Bloemen BV");
    assert_eq!(json["line_items"][0]["code"], "520");
    assert_eq!(json["transaction_timestamp"], "2024-12-31T23:59:00+02:00");
}
