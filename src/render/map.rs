use serde::Serialize;

use super::{html_escape, or_na, script_json, warning};
use crate::model::PlantingRecord;
use crate::summary::map_center;

pub const NO_DATA: &str = "No data available for selected filters.";
const ZOOM_START: u8 = 6;

#[derive(Debug, Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    popup: String,
}

/// Popup body for one marker. Values are escaped; the markup is ours.
pub fn popup_html(r: &PlantingRecord) -> String {
    format!(
        "<b>Date:</b> {}<br><b>Seedlings:</b> {}<br><b>Temperature:</b> {}°C<br><b>Rainfall:</b> {} mm",
        html_escape(&or_na(r.planting_date)),
        or_na(r.seedlings_planted),
        or_na(r.temperature),
        or_na(r.rainfall),
    )
}

/// One green circle marker per retained record, or a warning when there are none.
pub fn render_map(element_id: &str, retained: &[&PlantingRecord], large: bool) -> String {
    let Some((lat, lon)) = map_center(retained) else {
        return warning(NO_DATA);
    };
    let markers: Vec<Marker> = retained
        .iter()
        .map(|r| Marker {
            lat: r.latitude,
            lon: r.longitude,
            popup: popup_html(r),
        })
        .collect();

    format!(
        r#"<div id="{id}" class="map{class}"></div>
<script>
(function() {{
    const map = L.map('{id}', {{ preferCanvas: true }}).setView([{lat}, {lon}], {zoom});
    L.tileLayer('https://{{s}}.basemaps.cartocdn.com/light_all/{{z}}/{{x}}/{{y}}{{r}}.png', {{
        attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
        subdomains: 'abcd',
        maxZoom: 20
    }}).addTo(map);
    const markers = {markers};
    for (const m of markers) {{
        L.circleMarker([m.lat, m.lon], {{
            radius: 5,
            color: 'green',
            fill: true,
            fillColor: 'green',
            fillOpacity: 0.6
        }}).bindPopup(m.popup, {{ maxWidth: 250 }}).addTo(map);
    }}
}})();
</script>"#,
        id = element_id,
        class = if large { " large" } else { "" },
        lat = lat,
        lon = lon,
        zoom = ZOOM_START,
        markers = script_json(&markers),
    )
}
