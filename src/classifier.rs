//! Fail-cause classification for test records.
//!
//! Turns raw instrument columns into the derived indicators consumed by the
//! aggregator. Classification is a pure function of one record; malformed
//! values were already defaulted when the record was extracted.

use crate::constants::{PASS_TOKEN, PAUSE_TOKEN, RPM_CEILING};
use crate::models::{Classification, ClassifiedRecord, TestRecord};

/// Classify a single record
pub fn classify(record: &TestRecord) -> Classification {
    let passed = is_token(&record.total_result, PASS_TOKEN);
    let is_fail = u32::from(!passed);

    let rotating = record.rpm != 0.0;
    let idx1_high = record.index1 > record.index1_limit;
    let idx2_high = record.index2 > record.index2_limit;

    let spec_fail = u32::from(is_token(&record.intelligent_control, PASS_TOKEN) && !passed);

    let only_idx1 = u32::from(idx1_high && !idx2_high && rotating);
    let only_idx2 = u32::from(idx2_high && !idx1_high && rotating);
    let both_idx = u32::from(idx1_high && idx2_high && rotating);

    // Additive: spec_fail can coincide with an index condition.
    let noise = only_idx1 + only_idx2 + both_idx + spec_fail;

    // Additive: both thresholds can be exceeded at once.
    let out_control =
        u32::from(record.rpm > record.rpm_low) + u32::from(record.rpm > RPM_CEILING);
    let no_rotate = u32::from(record.rpm == 0.0);
    let rpm_ng = u32::from(out_control > 0 || no_rotate == 1);

    let pause = u32::from(is_pause_model(&record.model_name));
    let no_barcode = u32::from(
        record
            .barcode
            .as_deref()
            .is_none_or(|barcode| barcode.trim().is_empty()),
    );
    let others = u32::from(pause == 1 || no_barcode == 1);

    Classification {
        is_fail,
        noise,
        only_idx1,
        only_idx2,
        both_idx,
        spec_fail,
        out_control,
        no_rotate,
        rpm_ng,
        pause,
        no_barcode,
        others,
    }
}

/// Classify every record, preserving input order
pub fn classify_all(records: Vec<TestRecord>) -> Vec<ClassifiedRecord> {
    records
        .into_iter()
        .map(|record| {
            let class = classify(&record);
            ClassifiedRecord { record, class }
        })
        .collect()
}

/// Trimmed, case-insensitive token comparison
fn is_token(value: &str, token: &str) -> bool {
    value.trim().eq_ignore_ascii_case(token)
}

/// Model names are matched with all whitespace removed
fn is_pause_model(model_name: &str) -> bool {
    let compact: String = model_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    compact.contains(PAUSE_TOKEN)
}
