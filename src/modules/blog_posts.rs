//! Blog posts: slug derivation and publish-state transitions.

use serde_json::{Map, Value};

use crate::db::now_iso;
use crate::error::{AppError, AppResult};
use crate::schema::{
    field, filter, ConflictPolicy, FieldDefault, FieldKind, FieldSpec, FilterSpec,
    ResourceSchema,
};
use crate::slug::generate_slug;

static FIELDS: &[FieldSpec] = &[
    field("title", "title", FieldKind::Text).required(),
    field("slug", "slug", FieldKind::Text),
    field("excerpt", "excerpt", FieldKind::Text),
    field("content", "content", FieldKind::Text).required(),
    field("featuredImage", "featured_image", FieldKind::Text),
    field("author", "author", FieldKind::Text).required(),
    field("category", "category", FieldKind::Text),
    field("tags", "tags", FieldKind::StringArray),
    field("isPublished", "is_published", FieldKind::Boolean).default_to(FieldDefault::Bool(false)),
    field("publishedAt", "published_at", FieldKind::Text),
];

static FILTERS: &[FilterSpec] = &[
    filter("slug", "slug", FieldKind::Text),
    filter("category", "category", FieldKind::Text),
    filter("isPublished", "is_published", FieldKind::Boolean),
];

pub static SCHEMA: ResourceSchema = ResourceSchema {
    name: "Blog post",
    path: "blog-posts",
    table: "blog_posts",
    fields: FIELDS,
    search_columns: &["title", "excerpt", "content"],
    filters: FILTERS,
    sortable: &["title", "publishedAt"],
    // The unique slug index is the collision authority; on violation the
    // handler appends an epoch-millis suffix and retries once.
    on_conflict: ConflictPolicy::SuffixField { field: "slug" },
    prepare_create: Some(prepare_create),
    prepare_update: Some(prepare_update),
};

fn slug_from_title(body: &Map<String, Value>) -> AppResult<Option<String>> {
    let Some(title) = body.get("title").and_then(Value::as_str) else {
        return Ok(None);
    };
    if title.trim().is_empty() {
        return Ok(None);
    }
    let slug = generate_slug(title);
    if slug.is_empty() {
        return Err(AppError::validation(
            "INVALID_TITLE",
            "title must contain at least one alphanumeric character",
        ));
    }
    Ok(Some(slug))
}

/// Derives the slug and, for posts published at creation, the publish time.
/// `slug` and `publishedAt` are server-owned; client values are discarded.
fn prepare_create(
    _req: &actix_web::HttpRequest,
    body: &mut Map<String, Value>,
) -> AppResult<()> {
    body.remove("slug");
    body.remove("publishedAt");
    if let Some(slug) = slug_from_title(body)? {
        body.insert("slug".into(), Value::String(slug));
    }
    if body.get("isPublished").and_then(Value::as_bool) == Some(true) {
        body.insert("publishedAt".into(), Value::String(now_iso()));
    }
    Ok(())
}

/// Regenerates the slug when the title changed, and keeps `publishedAt` in
/// step with `isPublished` transitions: set once on false→true, cleared on
/// true→false. Client-supplied `slug` and `publishedAt` are discarded
/// before the transition logic runs.
fn prepare_update(existing: &Value, patch: &mut Map<String, Value>) -> AppResult<()> {
    patch.remove("slug");
    patch.remove("publishedAt");
    if let Some(new_slug) = slug_from_title(patch)? {
        let current = existing.get("slug").and_then(Value::as_str);
        if current != Some(new_slug.as_str()) {
            patch.insert("slug".into(), Value::String(new_slug));
        } else {
            patch.remove("slug");
        }
    }

    if let Some(publish) = patch.get("isPublished").and_then(Value::as_bool) {
        let was_published = existing.get("isPublished").and_then(Value::as_bool) == Some(true);
        if publish && !was_published {
            patch.insert("publishedAt".into(), Value::String(now_iso()));
        } else if !publish && was_published {
            patch.insert("publishedAt".into(), Value::Null);
        }
    }
    Ok(())
}
