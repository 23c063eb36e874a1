use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::{require, segment, Zendesk};
use crate::envelope::{decode, CursorEnvelope, ListEnvelope, SingleEnvelope};
use crate::error::Result;
use crate::options::add_options_or_default;
use crate::pagination::CursorPager;
use crate::rest::Transport;
use crate::types::*;

/// Custom object records, their fields, and lookup relationships.
#[async_trait]
pub trait CustomObjectApi {
    /// POST /custom_objects/{key}/records.json
    async fn create_custom_object_record(
        &self,
        ctx: &CancellationToken,
        record: CustomObjectRecord,
        custom_object_key: &str,
    ) -> Result<CustomObjectRecord>;

    /// GET /custom_objects/{key}/records/autocomplete - match records by name.
    async fn autocomplete_search_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&AutocompleteSearchCustomObjectRecordsOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta)>;

    /// GET /custom_objects/{key}/records/search - also returns the total
    /// match count.
    async fn search_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&SearchCustomObjectRecordsOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta, i64)>;

    /// GET /custom_objects/{key}/records
    async fn list_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&CustomObjectListOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta)>;

    /// GET /custom_objects/{key}/records/{id}
    async fn show_custom_object_record(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        custom_object_record_id: &str,
    ) -> Result<CustomObjectRecord>;

    /// PATCH /custom_objects/{key}/records/{id}
    async fn update_custom_object_record(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        custom_object_record_id: &str,
        record: CustomObjectRecord,
    ) -> Result<CustomObjectRecord>;

    /// GET /{target_type}/{target_id}/relationship_fields/{field_id}/{source_type}
    async fn get_sources_by_target(
        &self,
        ctx: &CancellationToken,
        target_type: &str,
        target_id: &str,
        field_id: &str,
        source_type: &str,
        opts: Option<&PageOptions>,
    ) -> Result<SourcesByTarget>;

    /// DELETE /custom_objects/{record.custom_object_key}/records/{record.id}
    async fn delete_custom_object_record(
        &self,
        ctx: &CancellationToken,
        record: &CustomObjectRecord,
    ) -> Result<()>;

    /// GET /custom_objects/{key}/fields - undeleted fields of the object.
    async fn list_custom_object_fields(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
    ) -> Result<Vec<CustomObjectField>>;
}

fn records_path(custom_object_key: &str) -> Result<String> {
    require("custom object key", custom_object_key)?;
    Ok(format!("/custom_objects/{}/records", segment(custom_object_key)))
}

fn record_path(custom_object_key: &str, record_id: &str) -> Result<String> {
    let records = records_path(custom_object_key)?;
    require("custom object record id", record_id)?;
    Ok(format!("{records}/{}", segment(record_id)))
}

#[async_trait]
impl<T: Transport> CustomObjectApi for Zendesk<T> {
    async fn create_custom_object_record(
        &self,
        ctx: &CancellationToken,
        record: CustomObjectRecord,
        custom_object_key: &str,
    ) -> Result<CustomObjectRecord> {
        let url = format!("{}.json", records_path(custom_object_key)?);
        let body = self.post(ctx, &url, &SingleEnvelope(record)).await?;
        let created: SingleEnvelope<CustomObjectRecord> = decode(&body)?;
        Ok(created.0)
    }

    async fn autocomplete_search_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&AutocompleteSearchCustomObjectRecordsOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta)> {
        let path = format!("{}/autocomplete", records_path(custom_object_key)?);
        let url = add_options_or_default(&path, opts)?;
        let env: CursorEnvelope<CustomObjectRecord> = self.get_json(ctx, &url).await?;
        Ok((env.items, env.meta))
    }

    async fn search_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&SearchCustomObjectRecordsOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta, i64)> {
        let path = format!("{}/search", records_path(custom_object_key)?);
        let url = add_options_or_default(&path, opts)?;
        let env: CursorEnvelope<CustomObjectRecord> = self.get_json(ctx, &url).await?;
        Ok((env.items, env.meta, env.count.unwrap_or_default()))
    }

    async fn list_custom_object_records(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        opts: Option<&CustomObjectListOptions>,
    ) -> Result<(Vec<CustomObjectRecord>, CursorPaginationMeta)> {
        let url = add_options_or_default(&records_path(custom_object_key)?, opts)?;
        let env: CursorEnvelope<CustomObjectRecord> = self.get_json(ctx, &url).await?;
        Ok((env.items, env.meta))
    }

    async fn show_custom_object_record(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        custom_object_record_id: &str,
    ) -> Result<CustomObjectRecord> {
        let url = record_path(custom_object_key, custom_object_record_id)?;
        let env: SingleEnvelope<CustomObjectRecord> = self.get_json(ctx, &url).await?;
        Ok(env.0)
    }

    async fn update_custom_object_record(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
        custom_object_record_id: &str,
        record: CustomObjectRecord,
    ) -> Result<CustomObjectRecord> {
        let url = record_path(custom_object_key, custom_object_record_id)?;
        let body = self.patch(ctx, &url, &SingleEnvelope(record)).await?;
        let updated: SingleEnvelope<CustomObjectRecord> = decode(&body)?;
        Ok(updated.0)
    }

    async fn get_sources_by_target(
        &self,
        ctx: &CancellationToken,
        target_type: &str,
        target_id: &str,
        field_id: &str,
        source_type: &str,
        opts: Option<&PageOptions>,
    ) -> Result<SourcesByTarget> {
        require("target type", target_type)?;
        require("target id", target_id)?;
        require("field id", field_id)?;
        require("source type", source_type)?;
        let path = format!(
            "/{}/{}/relationship_fields/{}/{}",
            segment(target_type),
            segment(target_id),
            segment(field_id),
            segment(source_type)
        );
        let url = add_options_or_default(&path, opts)?;
        self.get_json(ctx, &url).await
    }

    async fn delete_custom_object_record(
        &self,
        ctx: &CancellationToken,
        record: &CustomObjectRecord,
    ) -> Result<()> {
        let url = record_path(&record.custom_object_key, &record.id)?;
        self.delete(ctx, &url).await
    }

    async fn list_custom_object_fields(
        &self,
        ctx: &CancellationToken,
        custom_object_key: &str,
    ) -> Result<Vec<CustomObjectField>> {
        require("custom object key", custom_object_key)?;
        let url = format!("/custom_objects/{}/fields", segment(custom_object_key));
        let env: ListEnvelope<CustomObjectField> = self.get_json(ctx, &url).await?;
        Ok(env.0)
    }
}

impl<T: Transport> Zendesk<T> {
    /// Cursor pager over `GET /custom_objects/{key}/records`.
    pub fn custom_object_records_pager(
        &self,
        custom_object_key: &str,
        opts: CustomObjectListOptions,
    ) -> Result<CursorPager<'_, T, CustomObjectRecord, CustomObjectListOptions>> {
        Ok(CursorPager::new(self, records_path(custom_object_key)?, opts))
    }

    /// Cursor pager over `GET /custom_objects/{key}/records/search`.
    pub fn search_custom_object_records_pager(
        &self,
        custom_object_key: &str,
        opts: SearchCustomObjectRecordsOptions,
    ) -> Result<CursorPager<'_, T, CustomObjectRecord, SearchCustomObjectRecordsOptions>> {
        let path = format!("{}/search", records_path(custom_object_key)?);
        Ok(CursorPager::new(self, path, opts))
    }
}
