//! Bulletin metadata extraction from the `amoc` block

use tracing::debug;

use super::field_parsers::{parse_text, parse_timestamp};
use super::xml_tree::XmlElement;
use crate::app::models::BulletinMetadata;
use crate::constants::elements;

/// Extract bulletin metadata; a missing `amoc` block yields an all-`None` record
pub fn extract_metadata(root: &XmlElement) -> BulletinMetadata {
    let Some(amoc) = root.child(elements::AMOC) else {
        debug!("No {} block found in bulletin", elements::AMOC);
        return BulletinMetadata::default();
    };

    let source = amoc.child(elements::SOURCE);
    let source_text = |name: &str| parse_text(source.and_then(|s| s.child_text(name)));

    BulletinMetadata {
        report_id: parse_text(amoc.child_text(elements::IDENTIFIER)),
        issue_time_utc: parse_timestamp(amoc.child_text(elements::ISSUE_TIME_UTC)),
        issue_time_local: parse_timestamp(amoc.child_text(elements::ISSUE_TIME_LOCAL)),
        sent_time: parse_timestamp(amoc.child_text(elements::SENT_TIME)),
        sender: source_text(elements::SENDER),
        office: source_text(elements::OFFICE),
        region: source_text(elements::REGION),
        status: parse_text(amoc.child_text(elements::STATUS)),
        service: parse_text(amoc.child_text(elements::SERVICE)),
        product_type: parse_text(amoc.child_text(elements::PRODUCT_TYPE)),
    }
}
