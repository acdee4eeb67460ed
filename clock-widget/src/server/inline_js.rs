/// Configurator glue: reports the page and its form to the session over the
/// socket and applies whatever operations come back.
pub(super) fn build_configurator_js(element_ids_json: &str) -> String {
    format!(
        r#"(function() {{
  'use strict';
  var ELEMENT_IDS = {element_ids_json};
  var form = document.getElementById('widgetForm');
  var frame = document.getElementById('previewFrame');
  var alerts = document.getElementById('alerts');

  function $(id) {{ return document.getElementById(id); }}
  function val(id) {{ var el = $(id); return el ? el.value : null; }}

  function readForm() {{
    var styling = $('customStyling');
    return {{
      dateFormatPreset: val('dateFormatPreset'),
      dateFormat: val('dateFormat'),
      fontFamily: val('fontFamily'),
      customStyling: !!(styling && styling.checked),
      fontSize: val('fontSize'),
      fontWeight: val('fontWeight'),
      color: val('color'),
      letterSpacing: val('letterSpacing'),
      textTransform: val('textTransform'),
      textShadow: val('textShadow')
    }};
  }}

  // ── Socket ──────────────────────────────────────
  var proto = location.protocol === 'https:' ? 'wss:' : 'ws:';
  var socket = new WebSocket(proto + '//' + location.host + '/ws');
  var queue = [];

  function send(msg) {{
    var text = JSON.stringify(msg);
    if (socket.readyState === WebSocket.OPEN) socket.send(text);
    else queue.push(text);
  }}

  socket.addEventListener('open', function() {{
    socket.send(JSON.stringify({{
      type: 'ready',
      pageUrl: location.origin + location.pathname,
      elements: ELEMENT_IDS.filter(function(id) {{ return !!$(id); }}),
      form: readForm()
    }}));
    queue.splice(0).forEach(function(text) {{ socket.send(text); }});
  }});

  socket.addEventListener('message', function(e) {{
    var msg;
    try {{ msg = JSON.parse(e.data); }} catch (err) {{ return; }}
    if (msg.type === 'notify') showAlert(msg);
    else apply(msg);
  }});

  socket.addEventListener('close', function() {{
    console.warn('configurator session closed');
  }});

  // ── View operations ─────────────────────────────
  function apply(op) {{
    var el = $(op.id);
    if (!el) return;
    switch (op.type) {{
      case 'setText':
        el.textContent = op.text;
        break;
      case 'setValue':
        el.value = op.value;
        break;
      case 'setVisible':
        el.hidden = !op.visible;
        if (op.expanded !== null && op.expanded !== undefined) {{
          el.setAttribute('aria-expanded', String(op.expanded));
        }}
        break;
      case 'navigate':
        el.src = op.url;
        break;
      case 'injectCss':
        injectCss(el, op.styleId, op.css);
        break;
      case 'appendOptions':
        op.options.forEach(function(name) {{
          var opt = document.createElement('option');
          opt.value = name;
          opt.textContent = name;
          el.appendChild(opt);
        }});
        break;
    }}
  }}

  function injectCss(frameEl, styleId, css) {{
    try {{
      var doc = frameEl.contentDocument || frameEl.contentWindow.document;
      var style = doc.getElementById(styleId);
      if (!style) {{
        style = doc.createElement('style');
        style.id = styleId;
        doc.head.appendChild(style);
      }}
      style.textContent = css;
    }} catch (err) {{
      send({{ type: 'injectFailed', error: String(err) }});
    }}
  }}

  function showAlert(n) {{
    if (!alerts) return;
    var div = document.createElement('div');
    div.className = 'alert alert-' + n.level;
    div.setAttribute('role', 'alert');
    div.textContent = n.message;
    alerts.appendChild(div);
    setTimeout(function() {{ div.remove(); }}, n.ttlMs);
  }}

  // ── Page events ─────────────────────────────────
  if (form) {{
    form.addEventListener('input', function() {{ send({{ type: 'input', form: readForm() }}); }});
    form.addEventListener('change', function() {{ send({{ type: 'change', form: readForm() }}); }});
    form.addEventListener('submit', function(e) {{ e.preventDefault(); }});
  }}

  if (frame) {{
    frame.addEventListener('load', function() {{
      var url = null;
      try {{ url = frame.contentWindow.location.href; }} catch (err) {{}}
      send({{ type: 'frameLoaded', url: url }});
    }});
  }}

  document.querySelectorAll('[data-copy]').forEach(function(btn) {{
    btn.addEventListener('click', function() {{
      var source = $(btn.getAttribute('data-copy'));
      var text = source ? source.textContent : '';
      if (!navigator.clipboard) {{
        send({{ type: 'copied', ok: false, error: 'clipboard unavailable' }});
        return;
      }}
      navigator.clipboard.writeText(text).then(
        function() {{ send({{ type: 'copied', ok: true, error: null }}); }},
        function(err) {{ send({{ type: 'copied', ok: false, error: String(err) }}); }}
      );
    }});
  }});
}})();"#
    )
}

/// Widget glue: waits for the font, then shows ticks from the stream.
pub(super) fn build_widget_js(
    label_id: &str,
    offset_key: &str,
    font_spec_json: &str,
    error_text_json: &str,
) -> String {
    format!(
        r#"(function() {{
  'use strict';
  var label = document.getElementById('{label_id}');
  var fontSpec = {font_spec_json};
  var errorText = {error_text_json};

  function fail(err) {{
    console.error('Failed to initialize clock:', err);
    if (label) label.textContent = errorText;
  }}

  function currentOffset() {{ return -new Date().getTimezoneOffset(); }}

  function start() {{
    if (!label) throw new Error('Clock element not found');
    var query = location.search ? location.search + '&' : '?';
    var source = null;
    var offset = null;

    // The stream renders in a fixed offset; reopen it when that offset
    // changes (daylight saving) or the connection drops.
    function connect() {{
      if (source) source.close();
      offset = currentOffset();
      source = new EventSource('clock/stream' + query + '{offset_key}=' + offset);
      source.addEventListener('message', function(e) {{
        label.textContent = JSON.parse(e.data);
      }});
      source.addEventListener('error', function() {{
        if (source.readyState === EventSource.CLOSED) setTimeout(connect, 1000);
      }});
    }}

    connect();
    setInterval(function() {{
      if (currentOffset() !== offset) connect();
    }}, 60000);
  }}

  var fontReady = document.fonts && document.fonts.load
    ? document.fonts.load(fontSpec).catch(function(err) {{
        console.warn('Failed to load font: ' + fontSpec, err);
      }})
    : Promise.resolve();
  fontReady.then(start).catch(fail);
}})();"#
    )
}
