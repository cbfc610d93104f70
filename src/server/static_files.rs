//! Embedded widget page, stylesheet and script.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Climatic Weather</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main class="panel">
    <h2 class="title">Climatic Weather</h2>
    <form id="search" autocomplete="off">
      <label for="city">City or State</label>
      <div class="field">
        <input type="text" id="city" placeholder="Enter city or state name" autocomplete="off">
        <ul id="suggestions" class="suggestions" hidden></ul>
      </div>
      <button type="submit" id="submit">Search</button>
    </form>
    <div class="status">
      <span id="error" class="error" hidden></span>
      <span id="loading" class="loading" hidden>Loading...</span>
    </div>
    <section id="card" class="card" hidden></section>
  </main>
  <script src="/app.js"></script>
</body>
</html>
"#;

pub const STYLE_CSS: &str = r#"body {
  margin: 0;
  min-height: 100vh;
  font-family: system-ui, sans-serif;
  background: linear-gradient(135deg, #dbeafe, #fef3c7, #fee2e2);
  display: flex;
  justify-content: center;
  align-items: flex-start;
  padding: 2rem 0.5rem;
}
.panel { width: 100%; max-width: 28rem; background: rgba(255,255,255,0.8); border-radius: 0.75rem; padding: 1.5rem; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }
.title { color: #1d4ed8; text-align: center; margin-top: 0; }
form { display: flex; flex-direction: column; gap: 0.75rem; }
label { font-weight: 600; color: #374151; }
.field { position: relative; }
input { width: 100%; box-sizing: border-box; padding: 0.75rem; border-radius: 0.5rem; border: 1px solid #d1d5db; background: #f3f4f6; }
button { background: #2563eb; color: white; font-weight: 700; border: 0; border-radius: 0.5rem; padding: 0.5rem; cursor: pointer; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.suggestions { position: absolute; z-index: 10; left: 0; right: 0; margin: 0.25rem 0 0; padding: 0; list-style: none; background: white; border: 1px solid #d1d5db; border-radius: 0.5rem; max-height: 15rem; overflow-y: auto; }
.suggestions li { padding: 0.5rem 1rem; cursor: pointer; }
.suggestions li:hover, .suggestions li:focus { background: #dbeafe; }
.status { min-height: 2rem; display: flex; justify-content: center; align-items: center; margin-top: 1rem; }
.error { color: #dc2626; font-weight: 600; text-align: center; }
.loading { color: #2563eb; font-weight: 600; }
.card { margin-top: 0.5rem; padding: 1.5rem; border-radius: 0.75rem; text-align: center; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }
.card h3 { color: #1d4ed8; margin: 0 0 0.5rem; }
.card p { margin: 0.35rem 0; color: #374151; }
.card .band { font-style: italic; }
.bg-cold { background: #dbeafe; }
.bg-warm { background: #fef9c3; }
.bg-hot { background: #fee2e2; }
"#;

/// Widget behaviour. Each lookup carries a sequence number and only the
/// newest response is rendered.
pub const APP_JS: &str = r#"(function () {
  const input = document.getElementById('city');
  const list = document.getElementById('suggestions');
  const form = document.getElementById('search');
  const submit = document.getElementById('submit');
  const errorBox = document.getElementById('error');
  const loadingBox = document.getElementById('loading');
  const card = document.getElementById('card');
  let latestSuggest = 0;
  let latestLookup = 0;

  function hideSuggestions() { list.hidden = true; list.innerHTML = ''; }

  function showSuggestions(items) {
    list.innerHTML = '';
    if (items.length === 0) { list.hidden = true; return; }
    for (const s of items) {
      const li = document.createElement('li');
      li.textContent = s.display;
      li.tabIndex = 0;
      li.setAttribute('aria-label', 'Search weather for ' + s.display);
      li.addEventListener('mousedown', (e) => { e.preventDefault(); pick(s); });
      list.appendChild(li);
    }
    list.hidden = false;
  }

  input.addEventListener('input', async () => {
    const q = input.value;
    const seq = ++latestSuggest;
    if (q.trim() === '') { hideSuggestions(); return; }
    const res = await fetch('/api/suggest?q=' + encodeURIComponent(q));
    if (seq !== latestSuggest) return;
    showSuggestions(await res.json());
  });

  document.addEventListener('mousedown', (e) => {
    if (e.target !== input && !list.contains(e.target)) hideSuggestions();
  });

  function pick(s) {
    input.value = s.display;
    hideSuggestions();
    input.blur();
    lookup('search=' + encodeURIComponent(s.search) + '&display=' + encodeURIComponent(s.display));
  }

  form.addEventListener('submit', (e) => {
    e.preventDefault();
    hideSuggestions();
    if (input.value.trim() === '') {
      errorBox.textContent = 'Please enter a city name.';
      errorBox.hidden = false;
      card.hidden = true;
      return;
    }
    lookup('q=' + encodeURIComponent(input.value));
  });

  async function lookup(params) {
    const seq = ++latestLookup;
    errorBox.hidden = true;
    card.hidden = true;
    loadingBox.hidden = false;
    submit.disabled = true;
    try {
      const res = await fetch('/api/weather?' + params);
      const body = await res.json();
      if (seq !== latestLookup) return;
      if (!res.ok) throw new Error(body.error || 'An error occurred.');
      render(body);
    } catch (err) {
      if (seq !== latestLookup) return;
      errorBox.textContent = err.message || 'An error occurred.';
      errorBox.hidden = false;
    } finally {
      if (seq === latestLookup) { loadingBox.hidden = true; submit.disabled = false; }
    }
  }

  function line(text, cls) {
    const p = document.createElement('p');
    p.textContent = text;
    if (cls) p.className = cls;
    card.appendChild(p);
  }

  function render(c) {
    card.innerHTML = '';
    card.className = 'card ' + c.background;
    const h = document.createElement('h3');
    h.textContent = c.display_label;
    card.appendChild(h);
    const img = document.createElement('img');
    img.src = c.icon_url;
    img.alt = c.weather.condition_description;
    card.appendChild(img);
    line(c.temperature_line);
    line(c.temperature_message, 'band');
    line(c.humidity_line);
    line(c.condition_message);
    if (c.wind_message) line(c.wind_message);
    if (c.sunrise_message) line(c.sunrise_message);
    if (c.sunset_message) line(c.sunset_message);
    card.hidden = false;
  }
})();
"#;
