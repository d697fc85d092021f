pub const HTML: &str = r#"<div class="{css_class}-wrapper"
     [class.clickable]="clickable"
     [class.animated]="animated"
     (click)="onClick($event)">
  <mat-icon class="{css_class}-icon"
            [class.small]="size === 'small'"
            [class.medium]="size === 'medium'"
            [class.large]="size === 'large'">
    {{ iconName || '{display_lower}' }}
  </mat-icon>
  <span class="icon-label" *ngIf="showLabel">{{ label || '{display_name}' }}</span>
</div>
"#;

pub const SCSS: &str = r#".{css_class}-wrapper {
  display: inline-flex;
  align-items: center;
  gap: 0.5rem;
  transition: all 0.2s ease;

  &.clickable {
    cursor: pointer;

    &:hover {
      transform: scale(1.1);
    }
  }

  &.animated:hover .{css_class}-icon {
    transition: all 0.3s ease;
    transform: rotate(360deg);
  }

  .{css_class}-icon {
    color: #333;

    &.small {
      font-size: 1rem;
      width: 1rem;
      height: 1rem;
    }

    &.medium {
      font-size: 1.5rem;
      width: 1.5rem;
      height: 1.5rem;
    }

    &.large {
      font-size: 2rem;
      width: 2rem;
      height: 2rem;
    }
  }

  .icon-label {
    font-size: 0.875rem;
    color: #666;
  }
}
"#;

pub const TS: &str = r#"import { Component, Input, Output, EventEmitter } from '@angular/core';

@Component({
  selector: '{selector}',
  templateUrl: './{css_class}.component.html',
  styleUrls: ['./{css_class}.component.scss']
})
export class {class_name} {
  @Input() iconName: string = '{display_lower}';
  @Input() size: 'small' | 'medium' | 'large' = 'medium';
  @Input() label: string = '{display_name}';
  @Input() showLabel: boolean = false;
  @Input() clickable: boolean = false;
  @Input() animated: boolean = false;

  @Output() clicked = new EventEmitter<MouseEvent>();

  onClick(event: MouseEvent): void {
    if (this.clickable) {
      this.clicked.emit(event);
    }
  }
}
"#;
