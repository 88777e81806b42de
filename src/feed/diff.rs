use std::collections::BTreeSet;

use super::render::{Element, Page, Region};
use super::view::Section;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    ShowSection(Section),
    ReplaceRegion { region: Region, elements: Vec<Element> },
}

/// Returns patches that turn `old` page into `new` page.
/// Regions with unchanged content are skipped.
pub fn diff(old: &Page, new: &Page) -> Vec<Patch> {
    let mut patches = vec![];
    if old.section != new.section {
        if let Some(section) = new.section {
            patches.push(Patch::ShowSection(section));
        };
    };
    let regions: BTreeSet<Region> = old.regions.keys()
        .chain(new.regions.keys())
        .copied()
        .collect();
    for region in regions {
        let old_elements = old.region(region);
        let new_elements = new.region(region);
        if old_elements != new_elements {
            patches.push(Patch::ReplaceRegion {
                region,
                elements: new_elements.to_vec(),
            });
        };
    };
    patches
}
