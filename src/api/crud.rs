//! Generic CRUD handlers, parameterized by a static [`ResourceSchema`].
//!
//! All seven resources share these four handlers; per-resource behavior
//! lives entirely in the schema tables and their hooks. Control flow per
//! request: parse query/body, validate, apply derived-field hooks, hit the
//! store, map to the response envelope.

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Map, Value};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::QueryBuilder;

use crate::db::{is_unique_violation, now_iso, row_to_json, AppState};
use crate::error::{AppError, AppResult};
use crate::query;
use crate::schema::{ConflictPolicy, ResourceSchema};
use crate::slug::with_unique_suffix;
use crate::validate::{build_insert, build_update, Assignment, SqlVal};

type Params = web::Query<HashMap<String, String>>;
type Schema = web::Data<&'static ResourceSchema>;

/// `GET /api/<resource>`: single record when `id` is given (all other
/// parameters ignored), otherwise a filtered, sorted, paginated list.
pub async fn list(schema: Schema, state: web::Data<AppState>, params: Params) -> AppResult<HttpResponse> {
    let schema = *schema.get_ref();

    if let Some(id) = query::parse_id(&params)? {
        let record = fetch_by_id(&state, schema, id)
            .await?
            .ok_or_else(|| AppError::not_found(schema.name))?;
        return Ok(HttpResponse::Ok().json(record));
    }

    let list_params = query::parse_list(schema, &params)?;
    let mut qb = query::build_select(schema, &list_params);
    let rows = qb.build().fetch_all(&state.db).await?;
    let records = rows
        .iter()
        .map(|row| row_to_json(schema, row))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(HttpResponse::Ok().json(records))
}

/// `POST /api/<resource>`: validates the full body, runs derived-field
/// hooks, inserts, and returns 201 with the created record.
pub async fn create(
    schema: Schema,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let schema = *schema.get_ref();
    let mut body = into_object(body.into_inner())?;

    if let Some(hook) = schema.prepare_create {
        hook(&req, &mut body)?;
    }

    let mut assignments = build_insert(schema, &body)?;
    let now = now_iso();
    assignments.push(Assignment {
        column: "created_at",
        value: SqlVal::Text(now.clone()),
    });
    assignments.push(Assignment {
        column: "updated_at",
        value: SqlVal::Text(now),
    });

    let row = match insert_row(&state, schema, &assignments).await {
        Ok(row) => row,
        Err(err) if is_unique_violation(&err) => match schema.on_conflict {
            ConflictPolicy::Duplicate { code, message } => {
                return Err(AppError::conflict(code, message))
            }
            ConflictPolicy::SuffixField { field } => {
                apply_suffix(schema, &mut assignments, field);
                insert_row(&state, schema, &assignments).await?
            }
            ConflictPolicy::Fail => return Err(err.into()),
        },
        Err(err) => return Err(err.into()),
    };

    Ok(HttpResponse::Created().json(row_to_json(schema, &row)?))
}

/// `PUT /api/<resource>?id=`: partial update. Fields absent from the
/// payload are left unchanged.
pub async fn update(
    schema: Schema,
    state: web::Data<AppState>,
    params: Params,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let schema = *schema.get_ref();
    let id = query::parse_id(&params)?.ok_or(AppError::InvalidId)?;

    let existing = fetch_by_id(&state, schema, id)
        .await?
        .ok_or_else(|| AppError::not_found(schema.name))?;

    let mut patch = into_object(body.into_inner())?;
    if let Some(hook) = schema.prepare_update {
        hook(&existing, &mut patch)?;
    }

    let mut assignments = build_update(schema, &patch)?;
    assignments.push(Assignment {
        column: "updated_at",
        value: SqlVal::Text(now_iso()),
    });

    let row = match update_row(&state, schema, id, &assignments).await {
        Ok(Some(row)) => row,
        Ok(None) => return Err(AppError::not_found(schema.name)),
        Err(err) if is_unique_violation(&err) => match schema.on_conflict {
            ConflictPolicy::Duplicate { code, message } => {
                return Err(AppError::conflict(code, message))
            }
            ConflictPolicy::SuffixField { field } => {
                apply_suffix(schema, &mut assignments, field);
                update_row(&state, schema, id, &assignments)
                    .await?
                    .ok_or_else(|| AppError::not_found(schema.name))?
            }
            ConflictPolicy::Fail => return Err(err.into()),
        },
        Err(err) => return Err(err.into()),
    };

    Ok(HttpResponse::Ok().json(row_to_json(schema, &row)?))
}

/// `DELETE /api/<resource>?id=`: removes the record and echoes it back.
pub async fn remove(
    schema: Schema,
    state: web::Data<AppState>,
    params: Params,
) -> AppResult<HttpResponse> {
    let schema = *schema.get_ref();
    let id = query::parse_id(&params)?.ok_or(AppError::InvalidId)?;

    let sql = format!("DELETE FROM {} WHERE id = ? RETURNING *", schema.table);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(schema.name))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} deleted successfully", schema.name),
        "deletedRecord": row_to_json(schema, &row)?,
    })))
}

fn into_object(body: Value) -> AppResult<Map<String, Value>> {
    body.as_object().cloned().ok_or_else(|| {
        AppError::validation("INVALID_BODY", "request body must be a JSON object")
    })
}

async fn fetch_by_id(
    state: &AppState,
    schema: &ResourceSchema,
    id: i64,
) -> AppResult<Option<Value>> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", schema.table);
    let row = sqlx::query(&sql).bind(id).fetch_optional(&state.db).await?;
    row.map(|r| row_to_json(schema, &r)).transpose()
}

async fn insert_row(
    state: &AppState,
    schema: &ResourceSchema,
    assignments: &[Assignment],
) -> Result<SqliteRow, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", schema.table));
    let mut columns = qb.separated(", ");
    for a in assignments {
        columns.push(a.column);
    }
    qb.push(") VALUES (");
    let mut values = qb.separated(", ");
    for a in assignments {
        bind_separated(&mut values, &a.value);
    }
    qb.push(") RETURNING *");
    qb.build().fetch_one(&state.db).await
}

async fn update_row(
    state: &AppState,
    schema: &ResourceSchema,
    id: i64,
    assignments: &[Assignment],
) -> Result<Option<SqliteRow>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", schema.table));
    let mut sets = qb.separated(", ");
    for a in assignments {
        sets.push(a.column);
        sets.push_unseparated(" = ");
        bind_value_unseparated(&mut sets, &a.value);
    }
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" RETURNING *");
    qb.build().fetch_optional(&state.db).await
}

fn bind_separated<'qb, 'args>(
    sep: &mut sqlx::query_builder::Separated<'qb, 'args, Sqlite, &'static str>,
    value: &SqlVal,
) {
    match value {
        SqlVal::Text(s) => sep.push_bind(s.clone()),
        SqlVal::Int(n) => sep.push_bind(*n),
        SqlVal::Real(f) => sep.push_bind(*f),
        SqlVal::Null => sep.push_bind(None::<String>),
    };
}

fn bind_value_unseparated<'qb, 'args>(
    sep: &mut sqlx::query_builder::Separated<'qb, 'args, Sqlite, &'static str>,
    value: &SqlVal,
) {
    match value {
        SqlVal::Text(s) => sep.push_bind_unseparated(s.clone()),
        SqlVal::Int(n) => sep.push_bind_unseparated(*n),
        SqlVal::Real(f) => sep.push_bind_unseparated(*f),
        SqlVal::Null => sep.push_bind_unseparated(None::<String>),
    };
}

/// Rewrites the colliding column with an epoch-millis suffix before the
/// single retry.
fn apply_suffix(schema: &ResourceSchema, assignments: &mut [Assignment], field: &'static str) {
    let Some(column) = schema.field(field).map(|f| f.column) else {
        return;
    };
    for a in assignments.iter_mut() {
        if a.column == column {
            if let SqlVal::Text(current) = &a.value {
                a.value = SqlVal::Text(with_unique_suffix(current));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::bootstrap::route_registry::configure_global_routes;
    use crate::db::AppState;

    async fn test_state() -> web::Data<AppState> {
        // One connection keeps every statement on the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        web::Data::new(AppState { db: pool })
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(test_state().await)
                    .configure(configure_global_routes),
            )
            .await
        };
    }

    // Awaitable request helpers; plain fns cannot name the service type.
    macro_rules! send {
        ($app:expr, $req:expr) => {
            async {
                let resp = test::call_service($app, $req).await;
                let status = resp.status().as_u16();
                let body: Value = test::read_body_json(resp).await;
                (status, body)
            }
        };
    }

    macro_rules! post {
        ($app:expr, $path:expr, $body:expr $(,)?) => {
            send!(
                $app,
                test::TestRequest::post()
                    .uri($path)
                    .set_json($body)
                    .to_request()
            )
        };
    }

    macro_rules! get {
        ($app:expr, $path:expr $(,)?) => {
            send!($app, test::TestRequest::get().uri($path).to_request())
        };
    }

    macro_rules! put {
        ($app:expr, $path:expr, $body:expr $(,)?) => {
            send!(
                $app,
                test::TestRequest::put()
                    .uri($path)
                    .set_json($body)
                    .to_request()
            )
        };
    }

    fn loan_application() -> Value {
        json!({
            "name": "Asha Verma",
            "phone": "9876543210",
            "email": "asha@example.com",
            "city": "Pune",
            "loanType": "home",
            "amount": 2_500_000,
            "monthlyIncome": 85_000,
            "consent": true
        })
    }

    #[actix_web::test]
    async fn create_and_fetch_loan_application() {
        let app = test_app!();

        let (status, created) = post!(&app, "/api/loan-applications", loan_application()).await;
        assert_eq!(status, 201);
        assert_eq!(created["status"], json!("pending"));
        assert_eq!(created["consent"], json!(true));
        assert!(created["createdAt"].is_string());

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = get!(&app, &format!("/api/loan-applications?id={}", id)).await;
        assert_eq!(status, 200);
        assert_eq!(fetched["name"], json!("Asha Verma"));
    }

    #[actix_web::test]
    async fn consent_false_is_rejected() {
        let app = test_app!();
        let mut body = loan_application();
        body["consent"] = json!(false);

        let (status, resp) = post!(&app, "/api/loan-applications", body).await;
        assert_eq!(status, 400);
        assert_eq!(resp["code"], json!("CONSENT_REQUIRED"));
    }

    #[actix_web::test]
    async fn status_filter_rejects_unknown_value() {
        let app = test_app!();
        let (status, resp) = get!(&app, "/api/loan-applications?status=eaten").await;
        assert_eq!(status, 400);
        assert_eq!(resp["code"], json!("INVALID_STATUS"));
    }

    #[actix_web::test]
    async fn pagination_clamps_and_offsets() {
        let app = test_app!();
        for i in 0..12 {
            let (status, _) = post!(
                &app,
                "/api/messages",
                json!({
                    "name": format!("Visitor {}", i),
                    "email": "v@example.com",
                    "message": "Please call back"
                }),
            )
            .await;
            assert_eq!(status, 201);
        }

        let (_, all) = get!(&app, "/api/messages?limit=1000").await;
        assert_eq!(all.as_array().unwrap().len(), 12);

        let (_, page) = get!(&app, "/api/messages?limit=5&offset=10").await;
        assert_eq!(page.as_array().unwrap().len(), 2);

        let (status, empty) = get!(&app, "/api/messages?offset=500").await;
        assert_eq!(status, 200);
        assert_eq!(empty, json!([]));
    }

    #[actix_web::test]
    async fn default_order_is_newest_first_by_id_tiebreak() {
        let app = test_app!();
        for name in ["first", "second", "third"] {
            post!(
                &app,
                "/api/messages",
                json!({"name": name, "email": "v@example.com", "message": "hi"}),
            )
            .await;
        }
        // Same-millisecond timestamps tie; ids break the tie.
        let (_, list) = get!(&app, "/api/messages").await;
        let names: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);

        let (_, list) = get!(&app, "/api/messages?order=asc").await;
        assert_eq!(list[0]["name"], json!("first"));
    }

    #[actix_web::test]
    async fn search_matches_across_columns() {
        let app = test_app!();
        post!(
            &app,
            "/api/messages",
            json!({"name": "Ravi", "email": "r@example.com", "subject": "EMI query", "message": "hi"}),
        )
        .await;
        post!(
            &app,
            "/api/messages",
            json!({"name": "Meena", "email": "m@example.com", "message": "hello"}),
        )
        .await;

        let (_, hits) = get!(&app, "/api/messages?search=emi").await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["name"], json!("Ravi"));

        let (_, hits) = get!(&app, "/api/messages?search=nothing-here").await;
        assert_eq!(hits, json!([]));
    }

    #[actix_web::test]
    async fn rating_filter_out_of_write_range_matches_nothing() {
        let app = test_app!();
        let (status, _) = post!(
            &app,
            "/api/testimonials",
            json!({"name": "Dev", "review": "Smooth process", "rating": 5}),
        )
        .await;
        assert_eq!(status, 201);

        let (status, list) = get!(&app, "/api/testimonials?rating=6").await;
        assert_eq!(status, 200);
        assert_eq!(list, json!([]));

        let (_, list) = get!(&app, "/api/testimonials?rating=5").await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn duplicate_setting_key_conflicts() {
        let app = test_app!();
        let (status, first) = post!(
            &app,
            "/api/settings",
            json!({"key": "contact.phone", "value": "1800-100-200"}),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(first["category"], json!("general"));

        let (status, resp) = post!(
            &app,
            "/api/settings",
            json!({"key": "contact.phone", "value": "other"}),
        )
        .await;
        assert_eq!(status, 409);
        assert_eq!(resp["code"], json!("DUPLICATE_KEY"));

        let (_, second) = post!(
            &app,
            "/api/settings",
            json!({"key": "office.hours", "value": "9-6"}),
        )
        .await;
        let second_id = second["id"].as_i64().unwrap();

        // Taking another row's key conflicts; keeping your own does not.
        let (status, resp) = put!(
            &app,
            &format!("/api/settings?id={}", second_id),
            json!({"key": "contact.phone"}),
        )
        .await;
        assert_eq!(status, 409);
        assert_eq!(resp["code"], json!("DUPLICATE_KEY"));

        let (status, updated) = put!(
            &app,
            &format!("/api/settings?id={}", second_id),
            json!({"key": "office.hours", "value": "10-7"}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(updated["value"], json!("10-7"));
    }

    #[actix_web::test]
    async fn identical_titles_get_distinct_slugs() {
        let app = test_app!();
        let body = json!({"title": "Home Loan Guide", "content": "...", "author": "Team"});

        let (status, first) = post!(&app, "/api/blog-posts", body.clone()).await;
        assert_eq!(status, 201);
        assert_eq!(first["slug"], json!("home-loan-guide"));

        let (status, second) = post!(&app, "/api/blog-posts", body).await;
        assert_eq!(status, 201);
        let slug = second["slug"].as_str().unwrap();
        assert!(slug.starts_with("home-loan-guide-"));
        assert_ne!(slug, "home-loan-guide");
    }

    #[actix_web::test]
    async fn publish_transition_sets_and_clears_published_at() {
        let app = test_app!();
        let (_, post_rec) = post!(
            &app,
            "/api/blog-posts",
            json!({"title": "Draft", "content": "...", "author": "Team"}),
        )
        .await;
        assert_eq!(post_rec["isPublished"], json!(false));
        assert!(post_rec["publishedAt"].is_null());
        let id = post_rec["id"].as_i64().unwrap();

        let (_, published) = put!(
            &app,
            &format!("/api/blog-posts?id={}", id),
            json!({"isPublished": true}),
        )
        .await;
        assert!(published["publishedAt"].is_string());

        let (_, unpublished) = put!(
            &app,
            &format!("/api/blog-posts?id={}", id),
            json!({"isPublished": false}),
        )
        .await;
        assert!(unpublished["publishedAt"].is_null());
    }

    #[actix_web::test]
    async fn forged_publish_time_is_discarded() {
        let app = test_app!();
        let (status, created) = post!(
            &app,
            "/api/blog-posts",
            json!({
                "title": "Draft",
                "content": "...",
                "author": "Team",
                "publishedAt": "2020-01-01T00:00:00Z"
            }),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(created["isPublished"], json!(false));
        assert!(created["publishedAt"].is_null());
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = put!(
            &app,
            &format!("/api/blog-posts?id={}", id),
            json!({"publishedAt": "2020-01-01T00:00:00Z", "slug": "forged"}),
        )
        .await;
        assert_eq!(status, 200);
        assert!(updated["publishedAt"].is_null());
        assert_eq!(updated["slug"], json!("draft"));
    }

    #[actix_web::test]
    async fn title_change_regenerates_slug() {
        let app = test_app!();
        let (_, created) = post!(
            &app,
            "/api/blog-posts",
            json!({"title": "Old Title", "content": "...", "author": "Team"}),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (_, same) = put!(
            &app,
            &format!("/api/blog-posts?id={}", id),
            json!({"title": "Old Title"}),
        )
        .await;
        assert_eq!(same["slug"], json!("old-title"));

        let (_, renamed) = put!(
            &app,
            &format!("/api/blog-posts?id={}", id),
            json!({"title": "New Title"}),
        )
        .await;
        assert_eq!(renamed["slug"], json!("new-title"));
    }

    #[actix_web::test]
    async fn tags_are_filtered_to_strings() {
        let app = test_app!();
        let (_, created) = post!(
            &app,
            "/api/blog-posts",
            json!({
                "title": "Tagged",
                "content": "...",
                "author": "Team",
                "tags": ["loans", 42, "emi", null]
            }),
        )
        .await;
        assert_eq!(created["tags"], json!(["loans", "emi"]));

        let (status, resp) = post!(
            &app,
            "/api/blog-posts",
            json!({
                "title": "Bad tags",
                "content": "...",
                "author": "Team",
                "tags": "{broken"
            }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(resp["code"], json!("INVALID_TAGS"));
    }

    #[actix_web::test]
    async fn partial_update_leaves_other_fields_alone() {
        let app = test_app!();
        let (_, created) = post!(
            &app,
            "/api/messages",
            json!({"name": "Ravi", "email": "r@example.com", "message": "hi"}),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = put!(
            &app,
            &format!("/api/messages?id={}", id),
            json!({"isRead": true}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(updated["isRead"], json!(true));
        assert_eq!(updated["name"], json!("Ravi"));
        assert_eq!(updated["message"], json!("hi"));
    }

    #[actix_web::test]
    async fn missing_or_bad_id_is_rejected() {
        let app = test_app!();

        let (status, resp) = put!(&app, "/api/messages", json!({"isRead": true})).await;
        assert_eq!(status, 400);
        assert_eq!(resp["code"], json!("INVALID_ID"));

        let (status, _) = get!(&app, "/api/messages?id=abc").await;
        assert_eq!(status, 400);

        let req = test::TestRequest::delete().uri("/api/messages").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn lookup_misses_are_404() {
        let app = test_app!();

        let (status, resp) = get!(&app, "/api/testimonials?id=999").await;
        assert_eq!(status, 404);
        assert_eq!(resp["code"], json!("NOT_FOUND"));

        let (status, _) = put!(&app, "/api/testimonials?id=999", json!({"rating": 4})).await;
        assert_eq!(status, 404);

        let req = test::TestRequest::delete()
            .uri("/api/testimonials?id=999")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn delete_echoes_the_removed_record() {
        let app = test_app!();
        let (_, created) = post!(
            &app,
            "/api/messages",
            json!({"name": "Gone", "email": "g@example.com", "message": "bye"}),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/messages?id={}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["deletedRecord"]["id"], json!(id));
        assert!(body["message"].as_str().unwrap().contains("deleted"));

        let (status, _) = get!(&app, &format!("/api/messages?id={}", id)).await;
        assert_eq!(status, 404);
    }

    #[actix_web::test]
    async fn emi_calculation_records_client_ip_and_ranges() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/emi-calculations")
            .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
            .set_json(json!({
                "amount": 500000,
                "tenureMonths": 60,
                "interestRate": 10.5,
                "emiAmount": 10747.22,
                "totalInterest": 144833.2,
                "totalAmount": 644833.2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["userIp"], json!("203.0.113.9"));

        let (status, resp) = post!(
            &app,
            "/api/emi-calculations",
            json!({
                "amount": 500000,
                "tenureMonths": 481,
                "interestRate": 10.5,
                "emiAmount": 1,
                "totalInterest": 1,
                "totalAmount": 1
            }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(resp["code"], json!("INVALID_TENURE_MONTHS"));
    }

    #[actix_web::test]
    async fn search_on_unsearchable_resource_still_lists() {
        let app = test_app!();
        let (status, _) = post!(
            &app,
            "/api/emi-calculations",
            json!({
                "amount": 500000,
                "tenureMonths": 60,
                "interestRate": 10.5,
                "emiAmount": 10747.22,
                "totalInterest": 144833.2,
                "totalAmount": 644833.2
            }),
        )
        .await;
        assert_eq!(status, 201);

        let (status, list) = get!(&app, "/api/emi-calculations?search=500").await;
        assert_eq!(status, 200);
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn loan_docs_sort_by_display_order() {
        let app = test_app!();
        for (name, order) in [("PAN card", 2), ("Salary slips", 1), ("Bank statement", 3)] {
            post!(
                &app,
                "/api/loan-docs",
                json!({"loanType": "home", "documentName": name, "displayOrder": order}),
            )
            .await;
        }

        let (_, docs) = get!(&app, "/api/loan-docs?sort=displayOrder&order=asc").await;
        let names: Vec<&str> = docs
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["documentName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Salary slips", "PAN card", "Bank statement"]);

        let (_, first) = get!(&app, "/api/loan-docs?id=1").await;
        assert_eq!(first["isMandatory"], json!(true));
    }

    #[actix_web::test]
    async fn health_probe_responds() {
        let app = test_app!();
        let (status, body) = get!(&app, "/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], json!("ok"));
    }
}
