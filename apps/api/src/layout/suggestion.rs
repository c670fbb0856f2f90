/// Page layout advice keyed by panel count.
pub fn layout_suggestion_for(panel_count: usize) -> String {
    let fixed = match panel_count {
        0 => "Empty page - no panels",
        1 => "Full-page splash panel",
        2 => "Two horizontal tiers (widescreen split)",
        3 => "Tier system: 1 large panel top, 2 smaller bottom",
        4 => "2x2 grid",
        5 => "Tier system: 2 panels top, 1 wide middle, 2 bottom",
        6 => "2x3 grid (classic comic page) or 3x2 tier system",
        7 => "Tier system: 3 top, 1 wide middle, 3 bottom",
        8 => "2x4 grid or four tiers of 2 panels",
        9 => "3x3 grid (nine-panel grid)",
        n => return format!("Custom layout with {n} panels - varies sizes for pacing"),
    };
    fixed.to_string()
}
