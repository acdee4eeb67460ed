pub(super) fn build_css() -> String {
    r#"* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { width: 100%; min-height: 100%; background: #0A0A0A; color: #A0A0A0;
  font-family: 'JetBrains Mono', monospace; font-size: 13px; }
[hidden] { display: none !important; }

/* ── Header ──────────────────────────────────────── */
.header {
  height: 40px; display: flex; align-items: center; padding: 0 18px;
  border-bottom: 1px solid #2A2A2A; gap: 10px; user-select: none;
}
.header .title { color: #D4AF37; font-weight: 600; }
.header .sep { color: #333; }

/* ── Layout ──────────────────────────────────────── */
.layout {
  display: grid; grid-template-columns: minmax(320px, 420px) 1fr;
  gap: 18px; padding: 18px;
}
@media (max-width: 860px) { .layout { grid-template-columns: 1fr; } }

.card {
  background: #141414; border: 1px solid #2A2A2A; border-radius: 6px;
  padding: 16px;
}
.card-label {
  font-size: 10px; text-transform: uppercase; letter-spacing: 1px;
  color: #666; margin-bottom: 12px;
}

/* ── Form ────────────────────────────────────────── */
.field { display: flex; flex-direction: column; gap: 6px; margin-bottom: 14px; }
.field label { font-size: 11px; color: #888; }
.field input[type=text], .field select {
  background: #0A0A0A; border: 1px solid #2A2A2A; color: #E0E0E0;
  padding: 7px 9px; border-radius: 4px; font-family: inherit; font-size: 12px;
}
.field input[type=color] {
  width: 48px; height: 28px; background: none; border: 1px solid #2A2A2A;
  border-radius: 4px; cursor: pointer;
}
.field input:focus, .field select:focus { outline: none; border-color: #D4AF37; }
.check { display: flex; align-items: center; gap: 8px; cursor: pointer; }
.check input { accent-color: #D4AF37; }
.hint { font-size: 10px; color: #555; }
.styling-settings { border-left: 2px solid #2A2A2A; padding-left: 12px; margin-top: 10px; }

/* ── Result ──────────────────────────────────────── */
.preview {
  height: 180px; border: 1px solid #2A2A2A; border-radius: 4px;
  background: #000; margin-bottom: 14px;
}
.preview iframe { width: 100%; height: 100%; border: 0; }
.output {
  position: relative; background: #0A0A0A; border: 1px solid #1F1F1F;
  border-radius: 4px; padding: 10px 12px; margin-bottom: 12px;
}
.output pre {
  white-space: pre-wrap; word-break: break-all; color: #D4AF37;
  font-family: inherit; font-size: 11px; line-height: 1.6; min-height: 1.6em;
}
.output button {
  position: absolute; top: 6px; right: 6px;
  background: #1F1F1F; border: 1px solid #2A2A2A; color: #A0A0A0;
  padding: 3px 10px; border-radius: 3px; font-size: 10px; cursor: pointer;
  font-family: inherit;
}
.output button:hover { color: #FFF; border-color: #444; }

/* ── Notifications ───────────────────────────────── */
.alerts {
  position: fixed; top: 52px; right: 18px; width: 300px;
  display: flex; flex-direction: column; gap: 8px; z-index: 10;
}
.alert {
  padding: 10px 14px; border-radius: 4px; font-size: 12px;
  border: 1px solid transparent; background: #141414;
  animation: alert-in 0.15s ease-out;
}
.alert-success { color: #22C55E; border-color: #14532D; }
.alert-info { color: #38BDF8; border-color: #0C4A6E; }
.alert-warning { color: #EAB308; border-color: #713F12; }
.alert-danger { color: #EF4444; border-color: #3F1818; }
@keyframes alert-in {
  from { opacity: 0; transform: translateY(-4px); }
  to { opacity: 1; transform: none; }
}"#
    .to_string()
}
