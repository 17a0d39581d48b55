//! In-page locator runtime.
//!
//! Locators are interpreted inside the page: a script receives the
//! serialized [`Locator`], computes the matching elements (accessible role
//! and name, placeholder, visible text, or CSS), and either tags the chosen
//! element with a one-shot data attribute for a follow-up CDP element lookup
//! or reports count/visibility/enablement probes. Tagging-and-returning a
//! selector keeps the element lookup atomic with resolution, the same way
//! the page scripts avoid racing a re-render between "find" and "act".

use serde_json::Value;
use tracker_driver::Locator;

/// Attribute used to tag a freshly resolved element. One token per
/// resolution; tokens are never reused, so stale tags from a previous
/// render are inert.
pub const ANCHOR_ATTR: &str = "data-tracker-e2e-anchor";

/// Shared JS helpers: accessible role/name computation, visibility,
/// locator-spec matching. Kept as one block so resolve and probe scripts
/// cannot drift apart.
const SUPPORT: &str = r#"
    const nameMatches = (m, candidate) => {
        const value = (candidate || '').trim();
        if (!m || m.match === 'any') return true;
        if (m.match === 'exact') return value.toLowerCase() === m.value.trim().toLowerCase();
        try { return new RegExp(m.value, 'iu').test(value); } catch (e) { return false; }
    };
    const isVisible = (el) => {
        if (!(el instanceof Element)) return false;
        const style = window.getComputedStyle(el);
        if (style.visibility === 'hidden' || style.display === 'none') return false;
        const rect = el.getBoundingClientRect();
        return rect.width > 0 || rect.height > 0 || el.getClientRects().length > 0;
    };
    const implicitRole = (el) => {
        const explicit = el.getAttribute && el.getAttribute('role');
        if (explicit) return explicit;
        const tag = el.tagName ? el.tagName.toLowerCase() : '';
        switch (tag) {
            case 'button': return 'button';
            case 'a': return el.hasAttribute('href') ? 'link' : '';
            case 'header': return 'banner';
            case 'nav': return 'navigation';
            case 'select': return 'combobox';
            case 'option': return 'option';
            case 'textarea': return 'textbox';
            case 'h1': case 'h2': case 'h3': case 'h4': case 'h5': case 'h6': return 'heading';
            case 'input': {
                const type = (el.getAttribute('type') || 'text').toLowerCase();
                if (type === 'button' || type === 'submit' || type === 'reset') return 'button';
                if (type === 'checkbox') return 'checkbox';
                if (type === 'radio') return 'radio';
                if (type === 'search') return 'searchbox';
                if (type === 'hidden') return '';
                return 'textbox';
            }
            default: return '';
        }
    };
    const accessibleName = (el) => {
        const label = el.getAttribute && el.getAttribute('aria-label');
        if (label) return label.trim();
        const labelledby = el.getAttribute && el.getAttribute('aria-labelledby');
        if (labelledby) {
            return labelledby.split(/\s+/)
                .map((id) => document.getElementById(id))
                .map((node) => node ? (node.textContent || '') : '')
                .join(' ')
                .trim();
        }
        if (el.labels && el.labels.length) {
            return Array.from(el.labels).map((l) => l.textContent || '').join(' ').trim();
        }
        if (el.title) return el.title.trim();
        return (el.innerText || el.textContent || '').trim();
    };
    const pickNth = (list, nth) => {
        if (!nth) return list.length ? list[0] : null;
        if (nth.nth === 'last') return list.length ? list[list.length - 1] : null;
        return list[nth.index] || null;
    };
    const findCandidates = (spec, root) => {
        let scopeRoot = root;
        if (spec.scope) {
            scopeRoot = pickNth(findCandidates(spec.scope, root), spec.scope.nth);
            if (!scopeRoot) return [];
        }
        const all = Array.from(scopeRoot.querySelectorAll('*'));
        switch (spec.kind) {
            case 'role':
                return all.filter((el) => isVisible(el)
                    && implicitRole(el) === spec.role
                    && nameMatches(spec.name, accessibleName(el)));
            case 'placeholder':
                return all.filter((el) => isVisible(el)
                    && el.getAttribute && el.getAttribute('placeholder') !== null
                    && nameMatches(spec.name, el.getAttribute('placeholder')));
            case 'text': {
                const matched = all.filter((el) => isVisible(el)
                    && nameMatches(spec.name, el.innerText || el.textContent || ''));
                // Innermost matches only, otherwise every ancestor qualifies.
                return matched.filter((el) => !matched.some((other) => other !== el && el.contains(other)));
            }
            case 'css':
                return Array.from(scopeRoot.querySelectorAll(spec.selector));
            default:
                return [];
        }
    };
"#;

fn spec_json(locator: &Locator) -> String {
    serde_json::to_string(locator).unwrap_or_else(|_| "null".to_string())
}

/// Resolve the locator and tag the chosen element. Returns
/// `{ status: "ok", matches, selector }` or `{ status: "not-found", matches: 0 }`.
pub fn resolve_script(locator: &Locator, token: &str) -> String {
    format!(
        r#"(() => {{
            {support}
            const spec = {spec};
            const list = findCandidates(spec, document);
            const pick = pickNth(list, spec.nth);
            if (!pick) return {{ status: 'not-found', matches: list.length }};
            pick.setAttribute({attr}, {token});
            return {{
                status: 'ok',
                matches: spec.nth ? 1 : list.length,
                selector: '[' + {attr} + '="' + {token} + '"]'
            }};
        }})()"#,
        support = SUPPORT,
        spec = spec_json(locator),
        attr = json_str(ANCHOR_ATTR),
        token = json_str(token),
    )
}

/// Read-only probe: `{ count, visible, enabled }` for the current render.
pub fn probe_script(locator: &Locator) -> String {
    format!(
        r#"(() => {{
            {support}
            const spec = {spec};
            const list = findCandidates(spec, document);
            const first = pickNth(list, spec.nth);
            const enabled = first
                ? !(first.disabled === true || first.getAttribute('aria-disabled') === 'true')
                : false;
            return {{
                count: list.length,
                visible: spec.nth ? (first ? isVisible(first) : false) : list.some(isVisible),
                enabled: enabled
            }};
        }})()"#,
        support = SUPPORT,
        spec = spec_json(locator),
    )
}

/// Replace the value of the resolved form field, firing the synthetic input
/// events the application's framework listens for. Assigning through the
/// prototype setter is required for controlled React inputs.
pub fn fill_script(locator: &Locator, text: &str) -> String {
    format!(
        r#"(() => {{
            {support}
            const spec = {spec};
            const list = findCandidates(spec, document);
            const el = pickNth(list, spec.nth);
            if (!el) return {{ status: 'not-found', matches: list.length }};
            if (el.disabled === true) return {{ status: 'not-enabled' }};
            el.focus();
            const text = {text};
            const proto = el instanceof HTMLTextAreaElement
                ? HTMLTextAreaElement.prototype
                : HTMLInputElement.prototype;
            const descriptor = Object.getOwnPropertyDescriptor(proto, 'value');
            if (descriptor && descriptor.set) {{
                descriptor.set.call(el, text);
            }} else {{
                el.value = text;
            }}
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ status: 'ok', matches: list.length }};
        }})()"#,
        support = SUPPORT,
        spec = spec_json(locator),
        text = json_str(text),
    )
}

fn json_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Outcome of a resolve/fill script evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    Ok { matches: usize, selector: Option<String> },
    NotFound { matches: usize },
    NotEnabled,
}

impl ScriptStatus {
    pub fn parse(value: &Value) -> Option<ScriptStatus> {
        let matches = value.get("matches").and_then(Value::as_u64).unwrap_or(0) as usize;
        match value.get("status").and_then(Value::as_str)? {
            "ok" => Some(ScriptStatus::Ok {
                matches,
                selector: value
                    .get("selector")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            "not-found" => Some(ScriptStatus::NotFound { matches }),
            "not-enabled" => Some(ScriptStatus::NotEnabled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracker_driver::NameMatch;

    #[test]
    fn resolve_script_embeds_spec_and_token() {
        let locator = Locator::role("button", NameMatch::pattern("создать задачу"));
        let script = resolve_script(&locator, "tok-1");
        assert!(script.contains("\"kind\":\"role\""));
        assert!(script.contains("создать задачу"));
        assert!(script.contains("tok-1"));
        assert!(script.contains(ANCHOR_ATTR));
    }

    #[test]
    fn fill_script_escapes_text_as_json() {
        let locator = Locator::placeholder(NameMatch::pattern("поиск"));
        let script = fill_script(&locator, "a \"quoted\" title");
        assert!(script.contains(r#""a \"quoted\" title""#));
    }

    #[test]
    fn parses_resolution_statuses() {
        let ok = json!({ "status": "ok", "matches": 2, "selector": "[x=\"y\"]" });
        assert_eq!(
            ScriptStatus::parse(&ok),
            Some(ScriptStatus::Ok {
                matches: 2,
                selector: Some("[x=\"y\"]".to_string())
            })
        );
        let missing = json!({ "status": "not-found", "matches": 0 });
        assert_eq!(
            ScriptStatus::parse(&missing),
            Some(ScriptStatus::NotFound { matches: 0 })
        );
        assert_eq!(ScriptStatus::parse(&json!({})), None);
    }
}
