//! The single dashboard page. Controls are built from `/_dash-layout`; every
//! control change posts the current state to `/_dash-update-component` and
//! swaps in the returned figures.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SpaceX Launch Records Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
        }
        h1 { text-align: center; color: #503D36; font-size: 40px; }
        select { width: 100%; padding: 8px; font-size: 14px; }
        .slider { display: flex; gap: 12px; align-items: center; }
        .slider input { flex: 1; }
        .marks { display: flex; justify-content: space-between; color: #666; font-size: 12px; }
        .chart { min-height: 450px; }
        .error { color: #b00020; }
    </style>
</head>
<body>
    <h1 id="title"></h1>
    <select id="site-dropdown"></select>
    <br>
    <div id="success-pie-chart" class="chart"></div>
    <br>
    <p id="payload-label"></p>
    <div class="slider">
        <input type="range" id="payload-low">
        <input type="range" id="payload-high">
        <span id="payload-value"></span>
    </div>
    <div class="marks" id="payload-marks"></div>
    <div id="success-payload-scatter-chart" class="chart"></div>
    <p class="error" id="error"></p>

    <script>
        const dropdown = document.getElementById('site-dropdown');
        const low = document.getElementById('payload-low');
        const high = document.getElementById('payload-high');

        function currentState() {
            let a = Number(low.value), b = Number(high.value);
            if (a > b) { [a, b] = [b, a]; }
            return { site: dropdown.value, payload: [a, b] };
        }

        function showRange(range) {
            document.getElementById('payload-value').textContent = `${range[0]} - ${range[1]} kg`;
        }

        async function update(changed) {
            const body = { state: currentState() };
            if (changed) { body.changed = changed; }
            const response = await fetch('/_dash-update-component', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            const reply = await response.json();
            if (!response.ok) {
                document.getElementById('error').textContent = reply.error;
                return;
            }
            document.getElementById('error').textContent = '';
            showRange(reply.state.payload);
            for (const chart of reply.charts) {
                Plotly.react(chart.id, chart.figure.data, chart.figure.layout, { responsive: true });
            }
        }

        async function init() {
            const layout = await (await fetch('/_dash-layout')).json();
            document.getElementById('title').textContent = layout.title;

            const site = layout.site_dropdown;
            dropdown.innerHTML = site.options
                .map(o => `<option value="${o.value}">${o.label}</option>`)
                .join('');
            dropdown.value = site.value;
            dropdown.title = site.placeholder;

            const slider = layout.payload_slider;
            document.getElementById('payload-label').textContent = slider.label;
            for (const input of [low, high]) {
                input.min = slider.min;
                input.max = slider.max;
                input.step = 'any';
            }
            low.value = slider.value[0];
            high.value = slider.value[1];
            document.getElementById('payload-marks').innerHTML =
                slider.marks.map(m => `<span>${m}</span>`).join('');

            const snap = input => {
                input.value = Math.round(Number(input.value) / slider.step) * slider.step;
            };
            dropdown.addEventListener('change', () => update('site-dropdown'));
            for (const input of [low, high]) {
                input.addEventListener('change', () => { snap(input); update('payload-slider'); });
            }

            await update(null);
        }

        init().catch(err => {
            document.getElementById('error').textContent = 'Error: ' + err;
        });
    </script>
</body>
</html>
"##;
