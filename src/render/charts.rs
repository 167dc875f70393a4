use serde::Serialize;

use super::script_json;

#[derive(Debug, Serialize)]
struct Dataset<'a> {
    label: &'a str,
    data: &'a [f64],
    #[serde(rename = "backgroundColor")]
    background_color: &'a [&'a str],
}

/// Chart.js bar chart; one colour per bar.
pub fn bar_chart(
    element_id: &str,
    series_label: &str,
    labels: &[String],
    values: &[f64],
    colors: &[&str],
) -> String {
    let dataset = Dataset {
        label: series_label,
        data: values,
        background_color: colors,
    };
    format!(
        r#"<div class="chart"><canvas id="{id}"></canvas></div>
<script>
new Chart(document.getElementById('{id}'), {{
    type: 'bar',
    data: {{ labels: {labels}, datasets: [{dataset}] }},
    options: {{ plugins: {{ legend: {{ display: false }} }}, scales: {{ y: {{ beginAtZero: true }} }} }}
}});
</script>"#,
        id = element_id,
        labels = script_json(labels),
        dataset = script_json(&dataset),
    )
}
