//! Translation of a `find` with extra aggregation stages into a single pipeline.

use mongodb::{
    bson::{Document, doc},
    options::{AggregateOptions, FindOptions},
};

/// Builds the pipeline equivalent to `find(filter)` with `stages` applied to the matched
/// documents before the cursor modifiers of `options`.
///
/// The resulting order is `$match`, the given stages, then `$sort`, `$skip`, `$limit` and
/// `$project`, mirroring the order in which the server applies find modifiers.
pub fn find_pipeline(
    filter: Document,
    stages: impl IntoIterator<Item = Document>,
    options: Option<&FindOptions>,
) -> Vec<Document> {
    let mut pipeline = vec![doc! { "$match": filter }];

    pipeline.extend(stages);

    let Some(options) = options else {
        return pipeline;
    };

    if let Some(sort) = &options.sort {
        pipeline.push(doc! { "$sort": sort.clone() });
    }

    if let Some(skip) = options.skip.filter(|skip| *skip > 0) {
        pipeline.push(doc! { "$skip": i64::try_from(skip).unwrap_or(i64::MAX) });
    }

    // Negative limits only change batching for find; 0 means no limit.
    if let Some(limit) = options.limit.filter(|limit| *limit != 0) {
        pipeline.push(doc! { "$limit": limit.checked_abs().unwrap_or(i64::MAX) });
    }

    if let Some(projection) = &options.projection {
        pipeline.push(doc! { "$project": projection.clone() });
    }

    pipeline
}

/// Carries over the find options that have an aggregate counterpart.
pub fn aggregate_options(options: Option<&FindOptions>) -> Option<AggregateOptions> {
    let options = options?;

    let mut aggregate = AggregateOptions::default();
    aggregate.allow_disk_use = options.allow_disk_use;
    aggregate.batch_size = options.batch_size;
    aggregate.collation = options.collation.clone();
    aggregate.comment = options.comment.clone();
    aggregate.hint = options.hint.clone();
    aggregate.let_vars = options.let_vars.clone();
    aggregate.max_time = options.max_time;
    aggregate.read_concern = options.read_concern.clone();
    aggregate.selection_criteria = options.selection_criteria.clone();

    Some(aggregate)
}
