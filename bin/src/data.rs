//! Data loading shared by the CLI stages.

use swapspread_bbg::{BdhExportProvider, BloombergSource, PullWindow};
use swapspread_calc::{CleanOptions, MERGED_KEY, SYIELDS_KEY, TYIELDS_KEY, clean_cached, compute_spreads};
use swapspread_traits::{CacheKey, DiskCache, PriceTable, Result, SpreadTable, TableCache};
use tracing::info;

use crate::settings::Settings;

/// The production source: BDH exports behind the on-disk cache.
pub(crate) type Source = BloombergSource<BdhExportProvider, DiskCache>;

/// Cleaned treasury and swap tables.
#[derive(Debug)]
pub(crate) struct Cleaned {
    pub(crate) treasury: PriceTable,
    pub(crate) swap: PriceTable,
}

pub(crate) fn source(settings: &Settings) -> Source {
    BloombergSource::new(
        BdhExportProvider::new(&settings.bbg_export_dir),
        DiskCache::new(&settings.data_dir),
        PullWindow::through_yesterday(settings.pull_start_date),
    )
}

/// Pull both raw tables and clean them, each step going through the cache.
pub(crate) fn load_cleaned(source: &mut Source, refresh: bool) -> Result<Cleaned> {
    let raw_swap = source.pull_raw_syields(refresh)?;
    let raw_treasury = source.pull_raw_tyields(refresh)?;

    let options = CleanOptions {
        force_refresh: refresh,
        persist: true,
    };
    let cache = source.cache_mut();
    let swap = clean_cached(cache, &CacheKey::new(SYIELDS_KEY), &raw_swap, options)?;
    let treasury = clean_cached(cache, &CacheKey::new(TYIELDS_KEY), &raw_treasury, options)?;

    info!(
        treasury_rows = treasury.len(),
        swap_rows = swap.len(),
        "loaded cleaned yields"
    );
    Ok(Cleaned { treasury, swap })
}

/// Compute the spread table and store it, replacing any stored copy.
pub(crate) fn calc_spreads(source: &mut Source, refresh: bool) -> Result<SpreadTable> {
    let cleaned = load_cleaned(source, refresh)?;
    let merged = source
        .cache_mut()
        .get_or_compute(&CacheKey::new(MERGED_KEY), true, || {
            compute_spreads(&cleaned.treasury, &cleaned.swap).map(SpreadTable::into_inner)
        })?;
    Ok(SpreadTable::new(merged))
}

/// The stored spread table, or a freshly computed one if none is stored.
pub(crate) fn load_spreads(source: &mut Source) -> Result<SpreadTable> {
    let key = CacheKey::new(MERGED_KEY);
    if let Some(merged) = source.cache().load(&key)? {
        info!(%key, rows = merged.height(), "Loading stored spread table");
        return Ok(SpreadTable::new(merged));
    }
    calc_spreads(source, false)
}
