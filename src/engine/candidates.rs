use crate::models::ngo::NgoRequest;

fn normalize(item: &str) -> String {
    item.trim().to_lowercase()
}

/// NGO requests whose item exactly matches `food_item` after trimming and
/// case-folding. Input order is preserved.
pub fn ngos_requesting<'a>(food_item: &str, ngos: &'a [NgoRequest]) -> Vec<&'a NgoRequest> {
    let wanted = normalize(food_item);

    ngos.iter()
        .filter(|ngo| normalize(&ngo.requested_item) == wanted)
        .collect()
}
