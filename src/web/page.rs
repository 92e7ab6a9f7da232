//! 单页界面
//!
//! 词表上传、文本输入、校验按钮与结果区域。结果片段由服务端渲染，页面只负责插入

const PAGE_CSS: &str = r#"
        body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 960px; padding: 24px; color: #262730; }
        h1 { margin-bottom: 24px; }
        h3 { margin-top: 28px; }
        textarea { width: 100%; font-size: 16px; padding: 8px; box-sizing: border-box; }
        button { margin-top: 12px; padding: 8px 18px; font-size: 15px; cursor: pointer; }
        .notice { padding: 10px 14px; border-radius: 6px; margin: 10px 0; }
        .notice.success { background: #e8f5e9; color: #1b5e20; }
        .notice.warning { background: #fff8e1; color: #8d6e00; }
        .notice.error { background: #fdecea; color: #b71c1c; }
        .error-word { margin: 4px 0 4px 12px; }
        .suggestions { color: #555; margin-top: 12px; }
        .highlight { background-color: #f0f2f6; padding: 20px; border-radius: 10px; white-space: pre-wrap; }
"#;

const PAGE_JS: &str = r#"
        const vocabInput = document.getElementById('vocabulary-file');
        const vocabStatus = document.getElementById('vocabulary-status');
        const textInput = document.getElementById('text-input');
        const results = document.getElementById('results');

        function notice(kind, message) {
            const div = document.createElement('div');
            div.className = 'notice ' + kind;
            div.textContent = message;
            return div;
        }

        vocabInput.addEventListener('change', async () => {
            const file = vocabInput.files[0];
            if (!file) return;
            vocabStatus.replaceChildren();
            const response = await fetch('/api/vocabulary', {
                method: 'POST',
                headers: { 'Content-Type': 'text/plain' },
                body: file,
            });
            const data = await response.json();
            vocabStatus.appendChild(response.ok
                ? notice('success', data.message)
                : notice('error', data.error));
        });

        document.getElementById('validate-btn').addEventListener('click', async () => {
            const response = await fetch('/api/validate', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ text: textInput.value }),
            });
            if (!response.ok) {
                results.replaceChildren(notice('error', 'Validation request failed: ' + response.status));
                return;
            }
            const data = await response.json();
            if (data.status === 'warning') {
                // 保留上一次结果
                results.prepend(notice('warning', data.message));
                return;
            }
            let html = '<h3>Validation Results</h3>';
            html += '<div>' + data.status_html + '</div>';
            html += data.errors_html;
            const suggestions = data.result.suggestions || [];
            if (suggestions.length > 0) {
                html += '<div class="suggestions">Closest vocabulary words: '
                    + suggestions.map(s => s.word + ' → ' + s.suggestion).join(', ')
                    + '</div>';
            }
            html += '<h3>Text with Highlighted Errors</h3>';
            html += data.highlighted_html;
            results.innerHTML = html;
        });
"#;

/// 主页面
pub fn index_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Spanish Text Validator</title>
    <style>
{css}
    </style>
</head>
<body>
    <h1>Spanish Text Validator</h1>

    <section>
        <label for="vocabulary-file">Load vocabulary file</label><br>
        <input type="file" id="vocabulary-file" accept=".txt">
        <div id="vocabulary-status"></div>
    </section>

    <section>
        <label for="text-input">Enter text to validate:</label>
        <textarea id="text-input" rows="10"></textarea>
        <button id="validate-btn">Validate Text</button>
    </section>

    <section id="results"></section>

    <script>
{js}
    </script>
</body>
</html>"#,
        css = PAGE_CSS,
        js = PAGE_JS,
    )
}
