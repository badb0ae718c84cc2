use egui::Color32;

/// Qualitative palette shared by the pie slices and scatter series.
const COLORS: [Color32; 10] = [
    Color32::from_rgb(0x63, 0x6E, 0xFA),
    Color32::from_rgb(0xEF, 0x55, 0x3B),
    Color32::from_rgb(0x00, 0xCC, 0x96),
    Color32::from_rgb(0xAB, 0x63, 0xFA),
    Color32::from_rgb(0xFF, 0xA1, 0x5A),
    Color32::from_rgb(0x19, 0xD3, 0xF3),
    Color32::from_rgb(0xFF, 0x66, 0x92),
    Color32::from_rgb(0xB6, 0xE8, 0x80),
    Color32::from_rgb(0xFF, 0x97, 0xFF),
    Color32::from_rgb(0xFE, 0xCB, 0x52),
];

pub fn color(index: usize) -> Color32 {
    COLORS[index % COLORS.len()]
}
