use crate::models::DirectorySnapshot;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save the snapshot as CSV with header.
pub fn save_csv<P: AsRef<Path>>(snapshot: &DirectorySnapshot, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "id",
        "store_name",
        "store_type",
        "province",
        "district",
        "subdistrict",
        "latitude",
        "longitude",
        "image_urls",
        "thumbnail_url",
        "total_images",
        "has_images",
    ))?;
    for r in snapshot.iter() {
        wtr.serialize((
            &r.id,
            &r.store_name,
            &r.store_type,
            &r.province,
            &r.district,
            &r.subdistrict,
            &r.latitude,
            &r.longitude,
            &r.image_urls,
            &r.thumbnail_url,
            r.total_images,
            r.has_images,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the snapshot as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(snapshot: &DirectorySnapshot, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&snapshot.records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
